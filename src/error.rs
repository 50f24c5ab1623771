use std::time::Duration;

/// All errors that can occur while fetching and decoding feeds.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    /// HTTP request failed (network, DNS, TLS, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The request did not settle within the configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    /// No API key is configured for the news generator.
    #[error("no api key configured for the news generator")]
    MissingApiKey,

    /// The match aggregation step itself failed (not an individual feed).
    #[error("could not fetch matches: {0}")]
    Aggregation(#[from] tokio::task::JoinError),

    /// The highlights feed could not be loaded.
    #[error("video highlights are currently unavailable: {0}")]
    HighlightsUnavailable(Box<FeedError>),
}

pub type Result<T> = std::result::Result<T, FeedError>;
