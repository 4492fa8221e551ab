//! Blog article extractor.

use chrono::DateTime;
use scraper::Selector;

use super::fields::category_labels;
use super::urls::normalize_image_url;
use crate::mirror::{collapse_ws, MirrorPage};
use crate::models::{derive_excerpt, Article};
use crate::report::JobReport;
use crate::sanitize::Sanitizer;

/// Posts are recognized by their published-time marker. A handful of known
/// posts predate the marker and are allow-listed by slug.
pub const PUBLISHED_MARKER: &str = "meta[property=\"article:published_time\"]";

/// Known article slugs whose pages lack the published marker.
pub const MARKER_EXCEPTIONS: &[&str] = &[
    "laser-safety-basics",
    "how-to-sell-your-used-laser",
];

const TITLE_HEADINGS: &[&str] = &["h1.fl-post-title", "h1.entry-title", "h1"];

pub struct ArticleExtractor {
    site_base: String,
    sanitizer: Sanitizer,
    author_block: Selector,
}

impl ArticleExtractor {
    pub fn new(site_base: &str) -> Self {
        Self {
            site_base: site_base.to_string(),
            sanitizer: Sanitizer::new(),
            author_block: Selector::parse(".fl-post-author, a[rel=\"author\"], .author.vcard")
                .expect("static selector"),
        }
    }

    /// True when the page carries the published marker or the slug is a
    /// known exception.
    pub fn is_published(&self, page: &MirrorPage, slug: &str) -> bool {
        page.meta_content(PUBLISHED_MARKER).is_some() || MARKER_EXCEPTIONS.contains(&slug)
    }

    pub fn extract(&self, page: &MirrorPage, slug: &str, report: &mut JobReport) -> Article {
        let mut article = Article {
            slug: slug.to_string(),
            ..Default::default()
        };

        article.title = page
            .first_text(TITLE_HEADINGS)
            .or_else(|| page.meta_content("meta[property=\"og:title\"]"))
            .or_else(|| page.title_tag())
            .unwrap_or_default();
        if article.title.is_empty() {
            report.field_missing("title");
        }

        article.body = self.sanitizer.clean_document(&page.document);
        if article.body.is_empty() {
            report.field_missing("body");
        }

        article.excerpt = derive_excerpt(&body_text(&article.body));

        article.featured_image = page
            .meta_content("meta[property=\"og:image\"]")
            .and_then(|raw| normalize_image_url(&raw, &self.site_base));
        if article.featured_image.is_none() {
            report.field_missing("featuredImage");
        }

        article.author = page
            .meta_content("meta[name=\"author\"]")
            .or_else(|| self.author_from_block(page));
        if article.author.is_none() {
            report.field_missing("author");
        }

        article.modified_at =
            page.meta_content("meta[property=\"article:modified_time\"]").map(normalize_date);
        // Published date falls back to the modified date when absent.
        article.published_at = page
            .meta_content(PUBLISHED_MARKER)
            .map(normalize_date)
            .or_else(|| article.modified_at.clone());
        if article.published_at.is_none() {
            report.field_missing("publishedAt");
        }

        article.categories = category_labels(&page.document);

        article
    }

    fn author_from_block(&self, page: &MirrorPage) -> Option<String> {
        page.document
            .select(&self.author_block)
            .next()
            .map(|el| collapse_ws(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty())
    }
}

/// Reformat a parseable timestamp to RFC 3339; keep the raw string when the
/// source already drifted from any known format.
fn normalize_date(raw: String) -> String {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or(raw)
}

/// Rough plain-text rendering of a sanitized body, for excerpt derivation.
fn body_text(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_tag = false;
    for ch in body.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    collapse_ws(&out)
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}
