//! Per-entity field extraction.
//!
//! Every extractor follows the same pattern: ordered fallback strategies,
//! first non-empty result wins, and a miss is a coverage tally rather than
//! an error.

pub mod article;
pub mod category;
pub mod content;
pub mod fields;
pub mod product;
pub mod urls;

pub use article::ArticleExtractor;
pub use category::CategoryExtractor;
pub use content::ContentExtractor;
pub use product::ProductExtractor;
