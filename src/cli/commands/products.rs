//! Product extraction job.

use console::style;

use crate::cli::helpers::{job_progress, write_records};
use crate::config::Settings;
use crate::extract::ProductExtractor;
use crate::mirror::{Mirror, MirrorPage};
use crate::models::Product;
use crate::report::JobReport;

/// Mirror subtree holding one directory per listing.
const PRODUCTS_ROOT: &str = "product";

pub fn cmd_products(settings: &Settings) -> anyhow::Result<()> {
    let mirror = Mirror::new(&settings.mirror_dir);
    let extractor = ProductExtractor::new(&settings.site_base);
    let mut report = JobReport::default();

    let dirs = mirror.subdirs(PRODUCTS_ROOT);
    if dirs.is_empty() {
        report.warn(format!(
            "no product directories under {}/{PRODUCTS_ROOT}",
            settings.mirror_dir.display()
        ));
    }
    println!(
        "{} Extracting {} product pages",
        style("→").cyan(),
        dirs.len()
    );

    let pb = job_progress(dirs.len() as u64);
    let mut records: Vec<Product> = Vec::with_capacity(dirs.len());
    for (slug, dir) in dirs {
        pb.set_message(slug.clone());
        match MirrorPage::load(&dir) {
            Ok(page) => {
                records.push(extractor.extract(&page, &slug, &mut report));
                report.produced += 1;
            }
            Err(e) => {
                report.warn(format!("skipping {slug}: {e}"));
                report.skipped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    records.sort_by(|a, b| a.slug.cmp(&b.slug));
    write_records(&settings.output_file("products"), &records)?;
    report.print_summary("products", None);
    Ok(())
}
