//! Jobs for the secondary content types: FAQs, reviews, team, static pages.

use console::style;
use serde::Serialize;

use crate::cli::helpers::{job_progress, write_records};
use crate::config::Settings;
use crate::extract::content::{FAQ_PAGES, REVIEW_PAGES, STATIC_PAGE_SLUGS, TEAM_PAGES};
use crate::extract::ContentExtractor;
use crate::mirror::{Mirror, MirrorPage};
use crate::models::StaticPage;
use crate::report::JobReport;

pub fn cmd_faqs(settings: &Settings) -> anyhow::Result<()> {
    single_page_job(settings, "faqs", FAQ_PAGES, |extractor, page, report| {
        extractor.faqs(page, report)
    })
}

pub fn cmd_reviews(settings: &Settings) -> anyhow::Result<()> {
    single_page_job(settings, "reviews", REVIEW_PAGES, |extractor, page, report| {
        extractor.reviews(page, report)
    })
}

pub fn cmd_team(settings: &Settings) -> anyhow::Result<()> {
    single_page_job(settings, "team", TEAM_PAGES, |extractor, page, report| {
        extractor.team(page, report)
    })
}

/// Shared driver for entity types that live on one mirror page. The page is
/// looked up under a short list of historical paths; a missing page is a
/// warning and yields an empty (but still written) output array.
fn single_page_job<T, F>(
    settings: &Settings,
    entity: &str,
    paths: &[&str],
    extract: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: Fn(&ContentExtractor, &MirrorPage, &mut JobReport) -> Vec<T>,
{
    let mirror = Mirror::new(&settings.mirror_dir);
    let extractor = ContentExtractor::new(&settings.site_base);
    let mut report = JobReport::default();

    println!("{} Extracting {entity}", style("→").cyan());
    let page = paths.iter().find_map(|path| mirror.page(path));
    let records = match page {
        Some(page) => {
            let records = extract(&extractor, &page, &mut report);
            report.produced = records.len();
            records
        }
        None => {
            report.warn(format!(
                "no {entity} page found (tried {})",
                paths.join(", ")
            ));
            Vec::new()
        }
    };

    write_records(&settings.output_file(entity), &records)?;
    report.print_summary(entity, None);
    Ok(())
}

pub fn cmd_pages(settings: &Settings) -> anyhow::Result<()> {
    let mirror = Mirror::new(&settings.mirror_dir);
    let extractor = ContentExtractor::new(&settings.site_base);
    let mut report = JobReport::default();

    println!(
        "{} Extracting {} static pages",
        style("→").cyan(),
        STATIC_PAGE_SLUGS.len()
    );

    let pb = job_progress(STATIC_PAGE_SLUGS.len() as u64);
    let mut records: Vec<StaticPage> = Vec::new();
    for slug in STATIC_PAGE_SLUGS {
        pb.set_message(*slug);
        match mirror.page(slug) {
            Some(page) => {
                records.push(extractor.static_page(&page, slug, &mut report));
                report.produced += 1;
            }
            None => {
                report.warn(format!("static page absent from mirror: {slug}"));
                report.skipped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    records.sort_by(|a, b| a.slug.cmp(&b.slug));
    write_records(&settings.output_file("pages"), &records)?;
    report.print_summary("pages", None);
    Ok(())
}
