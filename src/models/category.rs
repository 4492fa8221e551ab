//! Canonical category record.

use serde::{Deserialize, Serialize};

/// Taxonomy bucket a canonical category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    ProductType,
    Brand,
    LaserType,
    Application,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductType => "PRODUCT_TYPE",
            Self::Brand => "BRAND",
            Self::LaserType => "LASER_TYPE",
            Self::Application => "APPLICATION",
        }
    }
}

/// One entry of the hand-curated taxonomy, enriched from its mirror page.
///
/// The taxonomy list is authoritative: every listed slug produces exactly
/// one record even when the mirror page is absent, in which case the name
/// is derived from the slug and the content fields stay empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub slug: String,
    pub category_type: CategoryType,
    pub name: String,
    pub description: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub hero_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_type_serializes_screaming() {
        let json = serde_json::to_string(&CategoryType::LaserType).unwrap();
        assert_eq!(json, "\"LASER_TYPE\"");
    }
}
