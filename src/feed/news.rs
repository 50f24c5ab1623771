use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::FeedConfig;
use crate::error::{FeedError, Result};
use crate::feed;
use crate::model::NewsArticle;

const FALLBACK_ARTICLES: usize = 5;

/// Generate news articles, falling back to placeholder articles on any failure.
#[instrument(skip_all)]
pub(crate) async fn get_news(client: &reqwest::Client, config: &FeedConfig) -> Vec<NewsArticle> {
    match generate_news(client, config).await {
        Ok(articles) => {
            debug!(count = articles.len(), "generated news");
            articles
        }
        Err(e) => {
            warn!(error = %e, "news generation failed, serving placeholders");
            fallback_articles(Utc::now())
        }
    }
}

async fn generate_news(client: &reqwest::Client, config: &FeedConfig) -> Result<Vec<NewsArticle>> {
    let news = &config.news;
    let api_key = news.api_key.as_deref().ok_or(FeedError::MissingApiKey)?;

    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        news.endpoint.trim_end_matches('/'),
        news.model
    );
    let request = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(news.prompt.clone()),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: article_schema(),
        },
    };

    let response: GenerateResponse = feed::send_json(
        client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request),
        &url,
        config.timeout,
    )
    .await?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    let text = text.trim();
    let text = if text.is_empty() { "[]" } else { text };

    serde_json::from_str(text).map_err(|e| FeedError::Decode { url, source: e })
}

fn article_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "source": { "type": "STRING" },
                "publishedAt": { "type": "STRING", "description": "ISO date string" },
                "imageUrl": { "type": "STRING" }
            },
            "required": ["id", "title", "summary", "source", "publishedAt", "imageUrl"]
        }
    })
}

/// Placeholder articles shown when the generator is unavailable.
pub fn fallback_articles(now: DateTime<Utc>) -> Vec<NewsArticle> {
    let published_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    (0..FALLBACK_ARTICLES)
        .map(|i| NewsArticle {
            id: format!("fallback-{i}"),
            title: "Breaking: Major Tournament Update".to_string(),
            summary: "Stay tuned as we bring you more updates on the ongoing matches and player \
                      performances from around the globe."
                .to_string(),
            source: "YoSinTV News".to_string(),
            published_at: published_at.clone(),
            image_url: format!("https://picsum.photos/seed/{}/800/400", i + 40),
        })
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
