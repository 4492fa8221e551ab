//! Canonical category extractor.
//!
//! Unlike the other jobs this one is driven by the fixed taxonomy list, not
//! by what the mirror happens to contain: the scrape only enriches each
//! entry, and a missing page still yields a record with a slug-derived name.

use scraper::Selector;

use super::urls::normalize_image_url;
use crate::mirror::{Mirror, MirrorPage};
use crate::models::Category;
use crate::report::JobReport;
use crate::sanitize::Sanitizer;
use crate::taxonomy::{self, TaxonomyEntry};

const NAME_HEADINGS: &[&str] = &["h1.woocommerce-products-header__title", "h1.page-title", "h1"];

pub struct CategoryExtractor {
    site_base: String,
    sanitizer: Sanitizer,
    description_region: Selector,
    hero_image: Selector,
}

impl CategoryExtractor {
    pub fn new(site_base: &str) -> Self {
        Self {
            site_base: site_base.to_string(),
            sanitizer: Sanitizer::new(),
            description_region: Selector::parse(".term-description, .category-description")
                .expect("static selector"),
            hero_image: Selector::parse(".category-hero img, .fl-row-bg-photo img")
                .expect("static selector"),
        }
    }

    /// Produce the record for one taxonomy entry, enriched from its mirror
    /// page when present.
    pub fn extract(
        &self,
        mirror: &Mirror,
        entry: &TaxonomyEntry,
        report: &mut JobReport,
    ) -> Category {
        let page = mirror.page(&taxonomy::page_dir(entry.slug));
        if page.is_none() {
            report.warn(format!(
                "category page absent, using slug-derived name: {}",
                entry.slug
            ));
        }

        let mut category = Category {
            slug: entry.slug.to_string(),
            category_type: entry.category_type,
            name: taxonomy::humanize_slug(entry.slug),
            description: String::new(),
            meta_title: None,
            meta_description: None,
            hero_image: None,
        };

        let page = match page {
            Some(page) => page,
            None => return category,
        };

        if let Some(name) = page.first_text(NAME_HEADINGS) {
            category.name = name;
        } else {
            report.field_missing("name");
        }

        category.description = page
            .document
            .select(&self.description_region)
            .next()
            .map(|region| self.sanitizer.clean_fragment(region))
            .unwrap_or_default();
        if category.description.is_empty() {
            report.field_missing("description");
        }

        category.meta_title = page.title_tag();
        category.meta_description = page.meta_content("meta[name=\"description\"]");
        category.hero_image = self.hero(&page);
        if category.hero_image.is_none() {
            report.field_missing("heroImage");
        }

        category
    }

    fn hero(&self, page: &MirrorPage) -> Option<String> {
        page.meta_content("meta[property=\"og:image\"]")
            .or_else(|| {
                page.document
                    .select(&self.hero_image)
                    .next()
                    .and_then(|img| img.value().attr("src").map(str::to_string))
            })
            .and_then(|raw| normalize_image_url(&raw, &self.site_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryType;
    use std::fs;

    const ENTRY: TaxonomyEntry = TaxonomyEntry {
        slug: "yag-lasers-for-sale",
        category_type: CategoryType::LaserType,
    };

    #[test]
    fn missing_page_still_yields_record() {
        let tmp = tempfile::tempdir().unwrap();
        let mirror = Mirror::new(tmp.path());
        let mut report = JobReport::default();
        let category = CategoryExtractor::new("https://x.test").extract(&mirror, &ENTRY, &mut report);
        assert_eq!(category.slug, "yag-lasers-for-sale");
        assert_eq!(category.name, "Yag Lasers For Sale");
        assert!(category.description.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn page_enriches_record() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp
            .path()
            .join("product-category/yag-lasers-for-sale");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("index.html"),
            "<head><title>YAG Lasers | The Laser Store</title>\
             <meta name=\"description\" content=\"Refurbished YAG systems.\"></head>\
             <body><h1 class=\"page-title\">YAG Lasers For Sale</h1>\
             <div class=\"term-description\"><p>Long-pulse workhorses.</p></div></body>",
        )
        .unwrap();
        let mirror = Mirror::new(tmp.path());
        let mut report = JobReport::default();
        let category = CategoryExtractor::new("https://x.test").extract(&mirror, &ENTRY, &mut report);
        assert_eq!(category.name, "YAG Lasers For Sale");
        assert!(category.description.contains("Long-pulse workhorses."));
        assert_eq!(
            category.meta_description.as_deref(),
            Some("Refurbished YAG systems.")
        );
        assert!(report.warnings.is_empty());
    }
}
