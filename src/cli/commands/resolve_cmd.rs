//! Label resolution check command.
//!
//! Reconciliation proper happens when the loader links products and
//! articles to categories; this command answers "where would this label
//! land" against the same lookup, preferring the categories job's output so
//! the real scraped display names participate.

use std::fs;

use console::style;

use crate::config::Settings;
use crate::models::Category;
use crate::report::JobReport;
use crate::resolve::CategoryResolver;
use crate::taxonomy::CANONICAL_CATEGORIES;

pub fn cmd_resolve(settings: &Settings, labels: &[String]) -> anyhow::Result<()> {
    let mut resolver = build_resolver(settings);
    let mut report = JobReport::default();
    for label in labels {
        match resolver.resolve(label) {
            Some(slug) => {
                println!("{} {label} -> {slug}", style("✓").green());
                report.produced += 1;
            }
            None => {
                println!("{} {label} -> unresolved", style("✗").red());
                report.skipped += 1;
            }
        }
    }
    report.print_summary("resolve", Some(resolver.unmatched()));
    Ok(())
}

/// Resolver from `categories.json` when a prior categories run exists,
/// otherwise from the taxonomy with slug-derived names.
pub fn build_resolver(settings: &Settings) -> CategoryResolver {
    let path = settings.output_file("categories");
    if let Ok(raw) = fs::read_to_string(&path) {
        if let Ok(categories) = serde_json::from_str::<Vec<Category>>(&raw) {
            return CategoryResolver::from_categories(&categories);
        }
        tracing::warn!(
            "ignoring unreadable categories output at {}",
            path.display()
        );
    }
    CategoryResolver::from_taxonomy(CANONICAL_CATEGORIES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryType;
    use std::path::PathBuf;

    fn settings(output_dir: PathBuf) -> Settings {
        Settings {
            mirror_dir: PathBuf::from("mirror"),
            output_dir,
            site_base: "https://x.test".into(),
        }
    }

    #[test]
    fn mixed_labels_resolve_and_report_unmatched() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = settings(tmp.path().to_path_buf());
        // No categories.json yet, so the taxonomy fallback serves; the
        // unknown label must land in the summary's unmatched set.
        cmd_resolve(
            &settings,
            &["Accessories".into(), "Totally Unknown Brand".into()],
        )
        .unwrap();

        let mut resolver = build_resolver(&settings);
        assert!(resolver.resolve("Accessories").is_some());
        assert!(resolver.resolve("Totally Unknown Brand").is_none());
        assert!(resolver.unmatched().contains("Totally Unknown Brand"));
    }

    #[test]
    fn prefers_categories_output_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = settings(tmp.path().to_path_buf());
        let categories = vec![Category {
            slug: "yag-lasers-for-sale".into(),
            category_type: CategoryType::LaserType,
            name: "YAG Laser Systems".into(),
            description: String::new(),
            meta_title: None,
            meta_description: None,
            hero_image: None,
        }];
        let json = serde_json::to_string_pretty(&categories).unwrap();
        fs::write(settings.output_file("categories"), json).unwrap();

        // The scraped display name only exists in the output file.
        let mut resolver = build_resolver(&settings);
        assert_eq!(
            resolver.resolve("YAG Laser Systems").as_deref(),
            Some("yag-lasers-for-sale")
        );
    }
}
