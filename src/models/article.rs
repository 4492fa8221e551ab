//! Blog article record.

use serde::{Deserialize, Serialize};

/// One published blog post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub slug: String,
    /// Sanitized rich HTML body.
    pub body: String,
    /// Derived from the body text: at most 200 characters plus an ellipsis,
    /// cut at a word boundary.
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    /// ISO-8601; falls back to `modified_at` when the source lacks a
    /// published date.
    pub published_at: Option<String>,
    pub modified_at: Option<String>,
    /// Free-text category labels, unresolved.
    pub categories: Vec<String>,
}

/// Maximum excerpt length before the ellipsis.
pub const EXCERPT_MAX: usize = 200;

/// Derive an excerpt from plain body text: whole text when short enough,
/// otherwise truncated at the last whitespace boundary within the limit and
/// terminated with `"..."`.
pub fn derive_excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= EXCERPT_MAX {
        return text.to_string();
    }
    let head: String = text.chars().take(EXCERPT_MAX).collect();
    let cut = head
        .rfind(char::is_whitespace)
        .map(|i| head[..i].trim_end().to_string())
        .unwrap_or(head);
    format!("{cut}...")
}
