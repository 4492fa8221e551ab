//! Category extraction job.
//!
//! Driven by the curated taxonomy, not by scanning the mirror: one record
//! per canonical entry, scrape or no scrape.

use console::style;

use crate::cli::helpers::{job_progress, write_records};
use crate::config::Settings;
use crate::extract::CategoryExtractor;
use crate::mirror::Mirror;
use crate::models::Category;
use crate::report::JobReport;
use crate::taxonomy::CANONICAL_CATEGORIES;

pub fn cmd_categories(settings: &Settings) -> anyhow::Result<()> {
    let mirror = Mirror::new(&settings.mirror_dir);
    let extractor = CategoryExtractor::new(&settings.site_base);
    let mut report = JobReport::default();

    println!(
        "{} Extracting {} canonical categories",
        style("→").cyan(),
        CANONICAL_CATEGORIES.len()
    );

    let pb = job_progress(CANONICAL_CATEGORIES.len() as u64);
    let mut records: Vec<Category> = Vec::with_capacity(CANONICAL_CATEGORIES.len());
    for entry in CANONICAL_CATEGORIES {
        pb.set_message(entry.slug);
        records.push(extractor.extract(&mirror, entry, &mut report));
        report.produced += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    records.sort_by(|a, b| a.slug.cmp(&b.slug));
    write_records(&settings.output_file("categories"), &records)?;
    report.print_summary("categories", None);
    Ok(())
}
