//! Field-level extraction helpers shared across entity extractors.

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

use crate::mirror::collapse_ws;
use crate::taxonomy::humanize_slug;

/// Model years accepted from titles/slugs. Anything outside is treated as a
/// false positive from an unrelated digit sequence.
pub const YEAR_MIN: i32 = 1990;
pub const YEAR_MAX: i32 = 2030;

fn leading_year() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d{4})(?:\b|-)").expect("static regex"))
}

fn currency_amount() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)").expect("static regex"))
}

/// Four-digit year at the very start of the title, else of the slug,
/// bounded to the accepted range.
pub fn year_from(title: &str, slug: &str) -> Option<i32> {
    for source in [title, slug] {
        if let Some(caps) = leading_year().captures(source) {
            if let Ok(year) = caps[1].parse::<i32>() {
                if (YEAR_MIN..=YEAR_MAX).contains(&year) {
                    return Some(year);
                }
            }
        }
    }
    None
}

/// First currency-formatted amount in the text.
pub fn parse_price(text: &str) -> Option<f64> {
    let caps = currency_amount().captures(text)?;
    caps[1].replace(',', "").parse().ok()
}

/// Text content of an element subtree, skipping any descendant whose class
/// attribute contains one of the given substrings. Used to read the main
/// content region while excluding the related-products panel, whose prices
/// belong to other listings.
pub fn text_excluding(root: ElementRef, skip_class_substrings: &[&str]) -> String {
    let mut out = String::new();
    collect_text(root, skip_class_substrings, &mut out);
    collapse_ws(&out)
}

fn collect_text(el: ElementRef, skip: &[&str], out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(element) => {
                let skipped = element
                    .classes()
                    .any(|token| skip.iter().any(|s| token.contains(s)));
                if skipped {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, skip, out);
                }
            }
            _ => {}
        }
    }
}

/// Free-text category labels from `category-<slug>` class tokens on the
/// body and main content wrappers, humanized. Unresolved at this stage;
/// reconciliation happens when the records are loaded.
pub fn category_labels(document: &Html) -> Vec<String> {
    let selector = match Selector::parse("body, article, .fl-post, #content") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let mut labels = Vec::new();
    for element in document.select(&selector) {
        // Tokens come from the raw attribute, not `classes()`, which hands
        // them back sorted; output keeps the page's own label order.
        let class_attr = element.value().attr("class").unwrap_or_default();
        for token in class_attr.split_whitespace() {
            if let Some(slug) = token.strip_prefix("category-") {
                let label = humanize_slug(slug);
                if !label.is_empty() && !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }
    }
    labels
}
