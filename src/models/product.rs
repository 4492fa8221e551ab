//! Product listing record.

use serde::{Deserialize, Serialize};

/// One physical listing, extracted from a product page in the mirror.
///
/// Records are fully regenerated on every run; nothing here is merged with
/// prior output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Listing title; falls back to page metadata when the heading is gone.
    pub title: String,
    /// Stable identifier, taken from the source directory name.
    pub slug: String,
    /// Plain-text description, paragraphs joined by blank lines.
    pub description: String,
    /// Raw rich-text fragment for the description region.
    pub description_html: String,
    /// Listed price. The source site hides real prices, so this is usually
    /// absent.
    pub price: Option<f64>,
    /// True whenever `price` is null or zero.
    pub call_for_price: bool,
    /// Normalized full-resolution image URLs, de-duplicated, order kept.
    pub images: Vec<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub applications: Vec<String>,
    pub reference_number: Option<String>,
    pub system_includes: Option<String>,
    /// Free-text category labels as found on the page, unresolved.
    pub categories: Vec<String>,
    /// Candidate slugs guessed from related-product titles. Best-effort;
    /// non-matches are dropped downstream, not errors.
    pub related_products: Vec<String>,
    pub sku: Option<String>,
    /// Four-digit model year, bounded to [1990, 2030].
    pub year: Option<i32>,
}

impl Product {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            call_for_price: true,
            ..Default::default()
        }
    }

    /// Set the price and keep the call-for-price invariant: true iff the
    /// price is absent or zero.
    pub fn set_price(&mut self, price: Option<f64>) {
        self.call_for_price = !matches!(price, Some(p) if p > 0.0);
        self.price = price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_for_price_tracks_price() {
        let mut product = Product::new("2019-candela-gentlemax-pro");
        assert!(product.call_for_price);

        product.set_price(Some(42_500.0));
        assert!(!product.call_for_price);

        product.set_price(Some(0.0));
        assert!(product.call_for_price);

        product.set_price(None);
        assert!(product.call_for_price);
    }

    #[test]
    fn serializes_camel_case_with_nulls() {
        let product = Product::new("test-item");
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("callForPrice").unwrap().as_bool().unwrap());
        assert!(json.get("price").unwrap().is_null());
        assert!(json.get("referenceNumber").unwrap().is_null());
    }
}
