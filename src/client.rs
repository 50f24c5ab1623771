use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::config::FeedConfig;
use crate::error::Result;
use crate::feed;
use crate::model::*;
use crate::popup::{self, CooldownStore, UPDATE_POLL_INTERVAL};
use crate::ticker::Ticker;

/// The main entry point for reading the match, stream, highlight and news feeds.
///
/// `FeedClient` wraps a [`reqwest::Client`] and a [`FeedConfig`]. Every
/// request is bounded by the configured timeout.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> matchfeed::Result<()> {
/// use chrono::Utc;
/// use matchfeed::{sort_matches, FeedClient};
///
/// let client = FeedClient::new();
/// let mut matches = client.get_matches().await?;
/// sort_matches(&mut matches, Utc::now());
/// println!("Found {} matches", matches.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Create a new client with the default endpoints.
    pub fn new() -> Self {
        Self::with_config(FeedConfig::default())
    }

    pub fn with_config(config: FeedConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: FeedConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch cricket and football matches concurrently.
    ///
    /// A sport whose feed fails contributes no matches; only a failure of the
    /// aggregation itself is returned as an error.
    #[instrument(skip(self))]
    pub async fn get_matches(&self) -> Result<Vec<Match>> {
        feed::matches::get_matches(&self.http, &self.config).await
    }

    /// Fetch stream links for a slug. Never fails; see [`StreamData::default`].
    #[instrument(skip(self))]
    pub async fn get_match_streams(&self, slug: &str) -> StreamData {
        feed::streams::get_match_streams(&self.http, &self.config, slug).await
    }

    /// Fetch stream links for a match, deriving the slug from its details URL.
    pub async fn get_streams_for(&self, m: &Match) -> StreamData {
        let slug = self.stream_slug(m);
        self.get_match_streams(&slug).await
    }

    pub fn stream_slug(&self, m: &Match) -> String {
        feed::slug_from_details_url(
            &m.details_url,
            &self.config.stream_slug_param,
            &self.config.default_stream_slug,
        )
    }

    /// Fetch video highlights.
    #[instrument(skip(self))]
    pub async fn get_highlights(&self) -> Result<Vec<Highlight>> {
        feed::highlights::get_highlights(&self.http, &self.config).await
    }

    /// Generate news articles, or placeholders when the generator is unavailable.
    #[instrument(skip(self))]
    pub async fn get_news(&self) -> Vec<NewsArticle> {
        feed::news::get_news(&self.http, &self.config).await
    }

    /// Fetch the current alert directive, if one is active.
    #[instrument(skip(self))]
    pub async fn get_alert(&self) -> Option<AlertData> {
        feed::alert::get_alert(&self.http, &self.config).await
    }

    /// The alert to display now, honoring its cooldown. Marks it as shown.
    #[instrument(skip(self, store))]
    pub async fn next_alert(
        &self,
        store: &dyn CooldownStore,
        now: DateTime<Utc>,
    ) -> Option<AlertData> {
        let alert = self.get_alert().await?;
        if !alert.should_show(store, now) {
            return None;
        }
        alert.cooldown().record(store, now);
        Some(alert)
    }

    /// Fetch the published version manifest.
    #[instrument(skip(self))]
    pub async fn get_update_manifest(&self) -> Vec<UpdateEntry> {
        feed::alert::get_update_manifest(&self.http, &self.config).await
    }

    /// The newer release to announce, at most once per hour. Marks it as shown.
    #[instrument(skip(self, store))]
    pub async fn check_for_update(
        &self,
        store: &dyn CooldownStore,
        now: DateTime<Utc>,
    ) -> Option<UpdateEntry> {
        let cooldown = popup::update_cooldown();
        if !cooldown.is_ready(store, now) {
            return None;
        }

        let entries = self.get_update_manifest().await;
        let update = popup::find_update(&entries, &self.config.app_version)?.clone();
        info!(version = %update.version, "update available");
        cooldown.record(store, now);
        Some(update)
    }

    /// Re-run [`check_for_update`](Self::check_for_update) every
    /// [`UPDATE_POLL_INTERVAL`], starting now, until the ticker is dropped.
    /// Each announced entry is passed to `on_update`; hide it after
    /// [`UpdateEntry::auto_dismiss`].
    pub fn watch_updates<S, F>(&self, store: S, on_update: F) -> Ticker
    where
        S: CooldownStore + 'static,
        F: Fn(UpdateEntry) + Send + Sync + 'static,
    {
        self.watch_updates_every(UPDATE_POLL_INTERVAL, store, on_update)
    }

    pub(crate) fn watch_updates_every<S, F>(&self, period: Duration, store: S, on_update: F) -> Ticker
    where
        S: CooldownStore + 'static,
        F: Fn(UpdateEntry) + Send + Sync + 'static,
    {
        debug!(?period, "watching for updates");
        let client = self.clone();
        let store = Arc::new(store);
        let on_update = Arc::new(on_update);
        Ticker::spawn_async(period, move |now| {
            let client = client.clone();
            let store = Arc::clone(&store);
            let on_update = Arc::clone(&on_update);
            async move {
                if let Some(update) = client.check_for_update(&*store, now).await {
                    on_update(update);
                }
            }
        })
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}
