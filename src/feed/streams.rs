use reqwest::Url;
use tracing::{debug, instrument, warn};

use crate::config::FeedConfig;
use crate::feed;
use crate::model::StreamData;

/// Fetch the stream links published under `slug`.
///
/// Any failure yields an empty [`StreamData`] so the detail view still renders.
#[instrument(skip(client, config))]
pub(crate) async fn get_match_streams(
    client: &reqwest::Client,
    config: &FeedConfig,
    slug: &str,
) -> StreamData {
    let url = format!("{}/{slug}.json", config.streams_base_url.trim_end_matches('/'));
    match feed::get_json::<StreamData>(client, &url, config.timeout).await {
        Ok(data) => {
            debug!(events = data.events.len(), "fetched streams");
            data
        }
        Err(e) => {
            warn!(error = %e, "stream feed failed, showing no streams");
            StreamData::default()
        }
    }
}

/// Extract the stream slug from a match's details URL.
///
/// Blank or `#` URLs, and URLs without a usable `param`, map to `default`.
pub fn slug_from_details_url(details_url: &str, param: &str, default: &str) -> String {
    let details_url = details_url.trim();
    if details_url.is_empty() || details_url == "#" {
        return default.to_string();
    }

    let slug = match Url::parse(details_url) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == param)
            .map(|(_, value)| value.into_owned()),
        Err(_) => details_url
            .split_once(&format!("{param}="))
            .and_then(|(_, rest)| rest.split('&').next())
            .map(str::to_string),
    };

    slug.filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| default.to_string())
}
