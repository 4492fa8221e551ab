//! Secondary content records: FAQs, reviews, team members, static pages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub question: String,
    /// Sanitized rich HTML answer.
    pub answer: String,
    pub sort_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: Option<String>,
    pub body: String,
    /// Star count when the source shows one.
    pub rating: Option<u8>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub sort_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPage {
    pub slug: String,
    pub title: String,
    /// Sanitized rich HTML body.
    pub body: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}
