use tracing::{debug, instrument, warn};

use crate::config::FeedConfig;
use crate::feed;
use crate::model::{AlertData, UpdateEntry};

/// Fetch the alert directive. Errors and inactive alerts produce nothing.
#[instrument(skip_all)]
pub(crate) async fn get_alert(client: &reqwest::Client, config: &FeedConfig) -> Option<AlertData> {
    match feed::get_json::<AlertData>(client, &config.alert_url, config.timeout).await {
        Ok(alert) if alert.is_active() => Some(alert),
        Ok(alert) => {
            debug!(status = %alert.status, "alert not active");
            None
        }
        Err(e) => {
            warn!(error = %e, "alert fetch failed");
            None
        }
    }
}

/// Fetch the published version manifest; empty on any failure.
#[instrument(skip_all)]
pub(crate) async fn get_update_manifest(
    client: &reqwest::Client,
    config: &FeedConfig,
) -> Vec<UpdateEntry> {
    feed::get_json::<Vec<UpdateEntry>>(client, &config.version_url, config.timeout)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "update check failed");
            vec![]
        })
}
