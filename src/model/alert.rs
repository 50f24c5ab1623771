use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Remote directive for the promotional alert popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertData {
    pub status: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub daily_message: String,
    #[serde(default)]
    pub show_frequency: ShowFrequency,
    #[serde(default)]
    pub channels: Vec<AlertChannel>,
    #[serde(default)]
    pub ui_config: AlertUiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowFrequency {
    pub once_per_day: bool,
    pub cooldown_hours: f64,
}

/// A channel the alert links to (Telegram, WhatsApp, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertChannel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub url: String,
    pub cta_text: String,
    pub enabled: bool,
    pub priority: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertUiConfig {
    pub display_type: String,
    pub dismissible: bool,
    pub auto_close_seconds: u64,
    pub theme: String,
}

impl AlertData {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Enabled channels, lowest priority value first.
    pub fn visible_channels(&self) -> Vec<&AlertChannel> {
        let mut channels: Vec<_> = self.channels.iter().filter(|c| c.enabled).collect();
        channels.sort_by_key(|c| c.priority);
        channels
    }

    pub fn auto_close(&self) -> Option<Duration> {
        (self.ui_config.auto_close_seconds > 0)
            .then(|| Duration::from_secs(self.ui_config.auto_close_seconds))
    }
}

/// One entry of the published version manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntry {
    pub version: String,
    #[serde(default)]
    pub latest: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: String,
}
