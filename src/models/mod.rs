//! Output record types for the extraction pipeline.
//!
//! Field names and nullability are the contract with the downstream loader:
//! records serialize camelCase, and absent optionals serialize as `null`
//! rather than being omitted.

mod article;
mod category;
mod content;
mod product;

pub use article::{derive_excerpt, Article, EXCERPT_MAX};
pub use category::{Category, CategoryType};
pub use content::{Faq, Review, StaticPage, TeamMember};
pub use product::Product;
