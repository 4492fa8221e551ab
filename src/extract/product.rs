//! Product page extractor.
//!
//! Nearly every field runs an ordered fallback chain: try the primary
//! selector, then the next, accept the first non-empty result. The chains
//! are kept as explicit strategy lists so each step stays independently
//! testable.

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::fields::{self, text_excluding, year_from};
use super::urls::{dedupe_urls, largest_srcset_entry, normalize_image_url};
use crate::mirror::{collapse_ws, MirrorPage};
use crate::models::Product;
use crate::report::JobReport;
use crate::resolve::normalize_label;

/// Selector lists, primary first.
const TITLE_HEADINGS: &[&str] = &[
    "h1.fl-post-title",
    "h1.product_title",
    "h1.entry-title",
    "h1",
];
const MAIN_REGIONS: &[&str] = &[".fl-post-content", "div.product", ".entry-content", "body"];
const DESCRIPTION_REGIONS: &[&str] = &[
    ".product-description .fl-rich-text",
    ".woocommerce-product-details__short-description",
    ".fl-post-content .fl-rich-text",
];
const GALLERY_ANCHORS: &str =
    ".woocommerce-product-gallery a[href], a[data-fancybox][href], .product-gallery a[href]";
const FEATURED_IMAGES: &str =
    "img.wp-post-image, .woocommerce-product-gallery__image img, img.attachment-shop_single";
const GALLERY_IMAGES: &str = ".fl-photo-content img, .gallery img, .product-images img";
const SPEC_ROWS: &str =
    "table.shop_attributes tr, table.woocommerce-product-attributes tr, .product-specs tr";
const RELATED_TITLES: &str =
    ".related .woocommerce-loop-product__title, .related-products .product-title";
const SKU: &str = "[itemprop=\"sku\"], span.sku";

/// Attribute names tried on a featured image, highest resolution first.
const IMAGE_SRC_ATTRS: &[&str] = &["data-src", "data-lazy-src", "data-large_image"];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

pub struct ProductExtractor {
    site_base: String,
    gallery_anchors: Selector,
    featured_images: Selector,
    gallery_images: Selector,
    spec_rows: Selector,
    related_titles: Selector,
    paragraph: Selector,
    reference_line: Regex,
    includes_line: Regex,
    // Raw-HTML fallbacks for values split across inline markup.
    reference_raw: Regex,
    includes_raw: Regex,
}

impl ProductExtractor {
    pub fn new(site_base: &str) -> Self {
        Self {
            site_base: site_base.to_string(),
            gallery_anchors: Selector::parse(GALLERY_ANCHORS).expect("static selector"),
            featured_images: Selector::parse(FEATURED_IMAGES).expect("static selector"),
            gallery_images: Selector::parse(GALLERY_IMAGES).expect("static selector"),
            spec_rows: Selector::parse(SPEC_ROWS).expect("static selector"),
            related_titles: Selector::parse(RELATED_TITLES).expect("static selector"),
            paragraph: Selector::parse("p").expect("static selector"),
            reference_line: Regex::new(r"(?i)reference\s*(?:number|#)\s*:\s*(.+)")
                .expect("static regex"),
            includes_line: Regex::new(r"(?i)system\s+includes\s*:\s*(.+)").expect("static regex"),
            reference_raw: Regex::new(
                r"(?i)reference\s*number\s*:?\s*(?:<[^>]*>|&nbsp;|\s)*([A-Za-z0-9][A-Za-z0-9/\- ]*)",
            )
            .expect("static regex"),
            includes_raw: Regex::new(
                r"(?i)system\s+includes\s*:?\s*(?:<[^>]*>|&nbsp;|\s)*([^<]+)",
            )
            .expect("static regex"),
        }
    }

    /// Extract one product record. A malformed page yields a partially
    /// filled record plus coverage entries, never an error.
    pub fn extract(&self, page: &MirrorPage, slug: &str, report: &mut JobReport) -> Product {
        let mut product = Product::new(slug);

        product.title = self.title(page).unwrap_or_default();
        if product.title.is_empty() {
            report.field_missing("title");
        }

        product.set_price(self.price(page));

        let (description, description_html) = self.description(page);
        product.description = description;
        product.description_html = description_html;
        if product.description.is_empty() {
            report.field_missing("description");
        }

        product.images = self.images(page);
        if product.images.is_empty() {
            report.field_missing("images");
        }

        self.apply_spec_table(page, &mut product);
        if product.manufacturer.is_none() {
            report.field_missing("manufacturer");
        }
        if product.model.is_none() {
            report.field_missing("model");
        }

        product.reference_number = self.scan_description_line(page, &self.reference_line, &self.reference_raw);
        product.system_includes = self.scan_description_line(page, &self.includes_line, &self.includes_raw);

        product.categories = fields::category_labels(&page.document);
        if product.categories.is_empty() {
            report.field_missing("categories");
        }

        product.related_products = self.related_products(page);

        if product.sku.is_none() {
            product.sku = page
                .first_text(&[SKU])
                .filter(|s| !s.eq_ignore_ascii_case("n/a"));
        }

        product.year = year_from(&product.title, slug);

        product
    }

    fn title(&self, page: &MirrorPage) -> Option<String> {
        type Strategy = fn(&ProductExtractor, &MirrorPage) -> Option<String>;
        const STRATEGIES: &[Strategy] = &[
            |_, page| page.first_text(TITLE_HEADINGS),
            |_, page| page.meta_content("meta[property=\"og:title\"]"),
            |_, page| page.title_tag(),
        ];
        STRATEGIES.iter().find_map(|strategy| strategy(self, page))
    }

    /// Price lookup stays inside the main content region and skips the
    /// related-products panel, which carries other listings' prices. An
    /// absent or zero price is the expected case on this site, not an
    /// extraction failure.
    fn price(&self, page: &MirrorPage) -> Option<f64> {
        let main = page.first_match(MAIN_REGIONS)?;
        let text = text_excluding(main, &["related"]);
        fields::parse_price(&text)
    }

    fn description(&self, page: &MirrorPage) -> (String, String) {
        let region = match page.first_match(DESCRIPTION_REGIONS) {
            Some(region) => region,
            None => return (String::new(), String::new()),
        };
        let paragraphs: Vec<String> = region
            .select(&self.paragraph)
            .map(|p| collapse_ws(&p.text().collect::<String>()))
            .filter(|p| !p.is_empty())
            .collect();
        let text = if paragraphs.is_empty() {
            collapse_ws(&region.text().collect::<String>())
        } else {
            paragraphs.join("\n\n")
        };
        (text, region.inner_html().trim().to_string())
    }

    /// Image strategies, first one producing any URL wins; strategies are
    /// never merged.
    fn images(&self, page: &MirrorPage) -> Vec<String> {
        type Strategy = fn(&ProductExtractor, &MirrorPage) -> Vec<String>;
        const STRATEGIES: &[Strategy] = &[
            ProductExtractor::images_from_anchors,
            ProductExtractor::images_from_featured,
            ProductExtractor::images_from_gallery,
        ];
        for strategy in STRATEGIES {
            let found = strategy(self, page);
            if !found.is_empty() {
                return dedupe_urls(found);
            }
        }
        Vec::new()
    }

    fn images_from_anchors(&self, page: &MirrorPage) -> Vec<String> {
        page.document
            .select(&self.gallery_anchors)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| {
                let lower = href.to_ascii_lowercase();
                IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
            })
            .filter_map(|href| normalize_image_url(href, &self.site_base))
            .collect()
    }

    fn images_from_featured(&self, page: &MirrorPage) -> Vec<String> {
        page.document
            .select(&self.featured_images)
            .filter_map(|img| self.best_image_source(img))
            .collect()
    }

    fn images_from_gallery(&self, page: &MirrorPage) -> Vec<String> {
        page.document
            .select(&self.gallery_images)
            .filter_map(|img| self.best_image_source(img))
            .collect()
    }

    /// Highest-resolution source for one `<img>`: explicit full-size
    /// attributes first, then the widest srcset entry, then plain `src`.
    fn best_image_source(&self, img: ElementRef) -> Option<String> {
        let value = img.value();
        let raw = IMAGE_SRC_ATTRS
            .iter()
            .find_map(|name| value.attr(name))
            .map(str::to_string)
            .or_else(|| value.attr("srcset").and_then(largest_srcset_entry))
            .or_else(|| value.attr("src").map(str::to_string))?;
        normalize_image_url(&raw, &self.site_base)
    }

    /// Specifications table: rows matched by case-insensitive label.
    fn apply_spec_table(&self, page: &MirrorPage, product: &mut Product) {
        let cell = Selector::parse("th, td").expect("static selector");
        for row in page.document.select(&self.spec_rows) {
            let cells: Vec<String> = row
                .select(&cell)
                .map(|c| collapse_ws(&c.text().collect::<String>()))
                .collect();
            let (label, value) = match cells.as_slice() {
                [label, .., value] => (label.to_ascii_lowercase(), value.clone()),
                _ => continue,
            };
            if value.is_empty() {
                continue;
            }
            match label.trim_end_matches(':') {
                "manufacturer" | "brand" => product.manufacturer = Some(value),
                "model" => product.model = Some(value),
                "application" | "applications" => {
                    product.applications = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "sku" => product.sku = Some(value),
                _ => {}
            }
        }
    }

    /// Values like "Reference Number: LSR-1042" live inside description
    /// sentences, not structured markup. Paragraph text is scanned first;
    /// the raw-HTML regex is the fallback for values split across inline
    /// spans.
    fn scan_description_line(
        &self,
        page: &MirrorPage,
        line: &Regex,
        raw: &Regex,
    ) -> Option<String> {
        if let Some(region) = page.first_match(MAIN_REGIONS) {
            for p in region.select(&self.paragraph) {
                let text = collapse_ws(&p.text().collect::<String>());
                if let Some(caps) = line.captures(&text) {
                    return clean_scanned_value(&caps[1]);
                }
            }
        }
        raw.captures(&page.document.html())
            .and_then(|caps| clean_scanned_value(&caps[1]))
    }

    /// Related products are only exposed by title; derive a candidate slug
    /// that may or may not exist. Non-matches get dropped by the loader.
    fn related_products(&self, page: &MirrorPage) -> Vec<String> {
        dedupe_urls(
            page.document
                .select(&self.related_titles)
                .map(|el| normalize_label(&el.text().collect::<String>()))
                .filter(|slug| !slug.is_empty())
                .collect(),
        )
    }
}

fn clean_scanned_value(raw: &str) -> Option<String> {
    let value = collapse_ws(raw);
    let value = value.trim_end_matches(['.', ',']).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
