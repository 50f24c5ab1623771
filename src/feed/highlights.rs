use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::FeedConfig;
use crate::error::{FeedError, Result};
use crate::feed::{self, text_field};
use crate::model::Highlight;

/// Fetch the highlights feed. Unlike the match feeds, a failure here is
/// reported to the caller.
#[instrument(skip_all)]
pub(crate) async fn get_highlights(
    client: &reqwest::Client,
    config: &FeedConfig,
) -> Result<Vec<Highlight>> {
    let payload = feed::get_json::<Value>(client, &config.highlights_url, config.timeout)
        .await
        .map_err(|e| FeedError::HighlightsUnavailable(Box::new(e)))?;

    let highlights: Vec<Highlight> = feed::list_items(payload, "highlights")
        .iter()
        .enumerate()
        .map(|(position, raw)| map_highlight(raw, position))
        .collect();

    debug!(count = highlights.len(), "parsed highlights");
    Ok(highlights)
}

/// Build a [`Highlight`] from one raw record. Records without an id are keyed by position.
pub fn map_highlight(raw: &Value, position: usize) -> Highlight {
    Highlight {
        id: text_field(raw, &["id"]).unwrap_or_else(|| format!("highlight-{position}")),
        team1: text_field(raw, &["team1"]).unwrap_or_else(|| "Team A".to_string()),
        team2: text_field(raw, &["team2"]).unwrap_or_else(|| "Team B".to_string()),
        category: text_field(raw, &["category"]).unwrap_or_default(),
        date: text_field(raw, &["date"]).unwrap_or_else(|| "TBD".to_string()),
        link: text_field(raw, &["link"]).unwrap_or_default(),
    }
}
