use serde::{Deserialize, Serialize};

/// A news article as returned by the generative provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    /// ISO 8601 date string.
    pub published_at: String,
    pub image_url: String,
}
