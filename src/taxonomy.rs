//! The hand-curated canonical category taxonomy.
//!
//! This list is authoritative: the categories job emits exactly one record
//! per entry whether or not the mirror still has the matching page, and the
//! reconciliation resolver only ever maps labels onto these slugs.

use crate::models::CategoryType;

/// One canonical taxonomy entry.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomyEntry {
    pub slug: &'static str,
    pub category_type: CategoryType,
}

const fn entry(slug: &'static str, category_type: CategoryType) -> TaxonomyEntry {
    TaxonomyEntry {
        slug,
        category_type,
    }
}

/// The fixed taxonomy, grouped by type. Output files are sorted by slug, so
/// the order here is for readability only.
pub const CANONICAL_CATEGORIES: &[TaxonomyEntry] = &[
    // Laser types
    entry("yag-lasers-for-sale", CategoryType::LaserType),
    entry("co2-lasers-for-sale", CategoryType::LaserType),
    entry("ipl-machines-for-sale", CategoryType::LaserType),
    entry("diode-lasers-for-sale", CategoryType::LaserType),
    entry("alexandrite-lasers-for-sale", CategoryType::LaserType),
    entry("erbium-lasers-for-sale", CategoryType::LaserType),
    entry("pico-lasers-for-sale", CategoryType::LaserType),
    entry("ruby-lasers-for-sale", CategoryType::LaserType),
    entry("radio-frequency-machines-for-sale", CategoryType::LaserType),
    // Brands
    entry("candela-lasers-for-sale", CategoryType::Brand),
    entry("cynosure-lasers-for-sale", CategoryType::Brand),
    entry("lumenis-lasers-for-sale", CategoryType::Brand),
    entry("cutera-lasers-for-sale", CategoryType::Brand),
    entry("syneron-lasers-for-sale", CategoryType::Brand),
    entry("alma-lasers-for-sale", CategoryType::Brand),
    entry("sciton-lasers-for-sale", CategoryType::Brand),
    entry("quanta-lasers-for-sale", CategoryType::Brand),
    entry("btl-machines-for-sale", CategoryType::Brand),
    // Applications
    entry("tattoo-removal-lasers-for-sale", CategoryType::Application),
    entry("hair-removal-lasers-for-sale", CategoryType::Application),
    entry("skin-resurfacing-lasers-for-sale", CategoryType::Application),
    entry("vein-removal-lasers-for-sale", CategoryType::Application),
    entry("body-contouring-machines-for-sale", CategoryType::Application),
    entry("pigmentation-lasers-for-sale", CategoryType::Application),
    // Product types
    entry("used-cosmetic-lasers-for-sale", CategoryType::ProductType),
    entry("other-cosmetic-lasers", CategoryType::ProductType),
    entry("laser-parts", CategoryType::ProductType),
    entry("laser-handpieces", CategoryType::ProductType),
];

/// Mirror directory names that differ from the canonical slug. Looked up
/// when the categories job resolves a slug to a page path.
pub const DIR_ALIASES: &[(&str, &str)] = &[
    ("ipl-machines-for-sale", "ipl-for-sale"),
    ("radio-frequency-machines-for-sale", "rf-machines-for-sale"),
    ("used-cosmetic-lasers-for-sale", "used-lasers"),
];

/// Manual label overrides, checked before any normalization heuristic.
///
/// These exist because a few labels were collapsed into an unrelated
/// canonical bucket by business decision; no spelling rule could derive
/// them. Keys are pre-normalized (lowercase, hyphenated).
pub const LABEL_OVERRIDES: &[(&str, &str)] = &[
    ("accessories", "other-cosmetic-lasers"),
    ("laser-accessories", "other-cosmetic-lasers"),
    ("uncategorized", "other-cosmetic-lasers"),
    ("parts", "laser-parts"),
    ("handpieces", "laser-handpieces"),
];

/// Mirror directory for a canonical slug, honoring the alias table.
pub fn page_dir(slug: &str) -> String {
    let dir = DIR_ALIASES
        .iter()
        .find(|(canonical, _)| *canonical == slug)
        .map(|(_, dir)| *dir)
        .unwrap_or(slug);
    format!("product-category/{dir}")
}

/// Human-readable name derived from a slug: hyphens to spaces, each word
/// title-cased. Used when a category's mirror page is missing and for
/// humanizing `category-*` class tokens into labels.
pub fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
