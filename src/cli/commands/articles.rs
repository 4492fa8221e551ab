//! Article extraction job.
//!
//! Blog posts live as top-level directories in the mirror, mixed in with
//! everything else the legacy site served. A fixed allow-list of known
//! non-article sections is excluded up front; whatever remains must carry
//! the published marker (or sit on the exception list) to count as a post.

use console::style;

use crate::cli::helpers::{job_spinner, write_records};
use crate::config::Settings;
use crate::extract::ArticleExtractor;
use crate::mirror::{Mirror, MirrorPage};
use crate::models::Article;
use crate::report::JobReport;

/// Top-level mirror directories that are never blog posts.
const EXCLUDED_SECTIONS: &[&str] = &[
    "product",
    "product-category",
    "shop",
    "cart",
    "checkout",
    "my-account",
    "wp-content",
    "wp-includes",
    "wp-json",
    "category",
    "tag",
    "author",
    "feed",
    "page",
    "faqs",
    "faq",
    "reviews",
    "testimonials",
    "team",
    "about",
    "contact",
    "financing",
    "warranty",
    "shipping-policy",
    "privacy-policy",
    "sell-your-laser",
];

pub fn cmd_articles(settings: &Settings) -> anyhow::Result<()> {
    let mirror = Mirror::new(&settings.mirror_dir);
    let extractor = ArticleExtractor::new(&settings.site_base);
    let mut report = JobReport::default();

    println!("{} Scanning mirror for published posts", style("→").cyan());
    let pb = job_spinner();

    let mut records: Vec<Article> = Vec::new();
    for (slug, dir) in mirror.subdirs("") {
        if EXCLUDED_SECTIONS.contains(&slug.as_str()) {
            continue;
        }
        pb.set_message(slug.clone());
        let page = match MirrorPage::load(&dir) {
            Ok(page) => page,
            Err(_) => {
                // Directories without an index.html are link targets or
                // asset folders, not posts.
                report.skipped += 1;
                continue;
            }
        };
        if !extractor.is_published(&page, &slug) {
            report.skipped += 1;
            continue;
        }
        records.push(extractor.extract(&page, &slug, &mut report));
        report.produced += 1;
    }
    pb.finish_and_clear();

    records.sort_by(|a, b| a.slug.cmp(&b.slug));
    write_records(&settings.output_file("articles"), &records)?;
    report.print_summary("articles", None);
    Ok(())
}
