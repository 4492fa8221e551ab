//! Category reconciliation: free-text labels to canonical slugs.
//!
//! Product and article pages embed category labels that were authored
//! independently of the curated taxonomy and drift in casing, pluralization
//! and suffix conventions ("Yag Lasers For Sale" vs `yag-lasers-for-sale`).
//! The resolver runs a short-circuiting chain: manual overrides, a direct
//! normalized match, then a fixed set of suffix rewrites. Anything left is
//! unresolved; callers drop the association and the label lands once in the
//! unmatched report.

use std::collections::{BTreeSet, HashMap};

use crate::models::Category;
use crate::taxonomy::{self, TaxonomyEntry, LABEL_OVERRIDES};

/// Label-to-slug resolver for one batch run.
///
/// Built once from the canonical category list and passed by reference to
/// callers; there is deliberately no module-level cache so resolution never
/// depends on access order.
pub struct CategoryResolver {
    /// Normalized form -> canonical slug. Holds every slug verbatim plus
    /// every display name run through the same normalization.
    lookup: HashMap<String, String>,
    overrides: HashMap<&'static str, &'static str>,
    cache: HashMap<String, Option<String>>,
    unmatched: BTreeSet<String>,
}

impl CategoryResolver {
    /// Build from `(slug, display name)` pairs.
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut lookup = HashMap::new();
        for (slug, name) in entries {
            lookup.insert(slug.to_string(), slug.to_string());
            lookup.insert(normalize_label(name), slug.to_string());
        }
        Self {
            lookup,
            overrides: LABEL_OVERRIDES.iter().copied().collect(),
            cache: HashMap::new(),
            unmatched: BTreeSet::new(),
        }
    }

    /// Build from the fixed taxonomy, with slug-derived display names.
    pub fn from_taxonomy(entries: &[TaxonomyEntry]) -> Self {
        let named: Vec<(String, String)> = entries
            .iter()
            .map(|e| (e.slug.to_string(), taxonomy::humanize_slug(e.slug)))
            .collect();
        Self::new(named.iter().map(|(s, n)| (s.as_str(), n.as_str())))
    }

    /// Build from the categories job's output, so resolution sees the real
    /// display names scraped from the mirror.
    pub fn from_categories(categories: &[Category]) -> Self {
        Self::new(
            categories
                .iter()
                .map(|c| (c.slug.as_str(), c.name.as_str())),
        )
    }

    /// Resolve a free-text label to a canonical slug.
    pub fn resolve(&mut self, label: &str) -> Option<String> {
        let key = normalize_label(label);
        if key.is_empty() {
            return None;
        }
        if let Some(cached) = self.cache.get(&key) {
            if cached.is_none() {
                self.unmatched.insert(label.trim().to_string());
            }
            return cached.clone();
        }
        let resolved = self.resolve_uncached(&key);
        if resolved.is_none() {
            self.unmatched.insert(label.trim().to_string());
        }
        self.cache.insert(key, resolved.clone());
        resolved
    }

    fn resolve_uncached(&self, key: &str) -> Option<String> {
        // Overrides win over every heuristic.
        if let Some(slug) = self.overrides.get(key) {
            return Some((*slug).to_string());
        }
        if let Some(slug) = self.lookup.get(key) {
            return Some(slug.clone());
        }
        for candidate in suffix_rewrites(key) {
            if let Some(slug) = self.lookup.get(&candidate) {
                return Some(slug.clone());
            }
        }
        None
    }

    /// Labels that failed to resolve, deduplicated, sorted.
    pub fn unmatched(&self) -> &BTreeSet<String> {
        &self.unmatched
    }
}

/// Normalize a label: lowercase, runs of non-alphanumerics to a single
/// hyphen, leading/trailing hyphens trimmed.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_hyphen = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// The suffix-insertion/removal retries, in the order they are attempted.
fn suffix_rewrites(key: &str) -> Vec<String> {
    let mut candidates = Vec::with_capacity(4);
    candidates.push(format!("{key}-for-sale"));
    if let Some(stripped) = key.strip_suffix("-for-sale") {
        candidates.push(stripped.to_string());
        candidates.push(format!("{stripped}-lasers"));
    }
    if let Some(stripped) = key.strip_suffix("-lasers") {
        candidates.push(format!("{stripped}-lasers-for-sale"));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::CANONICAL_CATEGORIES;

    fn resolver() -> CategoryResolver {
        CategoryResolver::from_taxonomy(CANONICAL_CATEGORIES)
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize_label("Yag Lasers For Sale"), "yag-lasers-for-sale");
        assert_eq!(normalize_label("  CO2 -- Lasers!  "), "co2-lasers");
        assert_eq!(normalize_label("---"), "");
    }

    #[test]
    fn override_wins() {
        let mut r = resolver();
        assert_eq!(
            r.resolve("Accessories").as_deref(),
            Some("other-cosmetic-lasers")
        );
    }

    #[test]
    fn direct_normalized_match() {
        let mut r = resolver();
        assert_eq!(
            r.resolve("Yag Lasers For Sale").as_deref(),
            Some("yag-lasers-for-sale")
        );
    }

    #[test]
    fn for_sale_suffix_appended() {
        let mut r = resolver();
        assert_eq!(
            r.resolve("CO2 Lasers").as_deref(),
            Some("co2-lasers-for-sale")
        );
    }

    #[test]
    fn lasers_suffix_rewrite() {
        // "yag" + "-lasers" stripped, "-lasers-for-sale" appended.
        let mut r = resolver();
        assert_eq!(
            r.resolve("Yag Lasers").as_deref(),
            Some("yag-lasers-for-sale")
        );
    }

    #[test]
    fn unknown_label_is_unresolved_and_reported_once() {
        let mut r = resolver();
        assert_eq!(r.resolve("Completely Unknown Brand"), None);
        assert_eq!(r.resolve("completely unknown brand"), None);
        assert_eq!(r.unmatched().len(), 2); // raw spellings kept as seen
        assert!(r.unmatched().contains("Completely Unknown Brand"));
    }

    #[test]
    fn display_names_from_categories_output() {
        use crate::models::{Category, CategoryType};
        let cats = vec![Category {
            slug: "yag-lasers-for-sale".into(),
            category_type: CategoryType::LaserType,
            name: "YAG Lasers".into(),
            description: String::new(),
            meta_title: None,
            meta_description: None,
            hero_image: None,
        }];
        let mut r = CategoryResolver::from_categories(&cats);
        assert_eq!(
            r.resolve("YAG lasers").as_deref(),
            Some("yag-lasers-for-sale")
        );
    }
}
