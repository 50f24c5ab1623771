use std::env;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};

use crate::error::{FeedError, Result};

/// Upper bound on any single feed request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoints and tunables used by [`FeedClient`](crate::FeedClient).
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub cricket_url: String,
    pub football_url: String,
    pub highlights_url: String,
    /// Stream documents live at `<streams_base_url>/<slug>.json`.
    pub streams_base_url: String,
    pub alert_url: String,
    pub version_url: String,
    /// Query parameter of a match's details URL that carries the stream slug.
    pub stream_slug_param: String,
    pub default_stream_slug: String,
    pub news: NewsConfig,
    pub app_version: String,
    pub timeout: Duration,
    /// Zone for match starts that carry no offset of their own.
    pub start_zone: StartZone,
}

/// How a start time without an explicit offset is placed on the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartZone {
    /// The zone of the machine reading the feed.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl StartZone {
    /// Place a wall-clock time in this zone. Times skipped by a DST jump
    /// use the offset in force at that instant read as UTC.
    pub fn resolve(self, naive: NaiveDateTime) -> DateTime<Utc> {
        match self {
            StartZone::Local => resolve_in(&Local, naive),
            StartZone::Utc => naive.and_utc(),
            StartZone::Fixed(offset) => resolve_in(&offset, naive),
        }
    }
}

fn resolve_in<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| {
            let offset = tz.offset_from_utc_datetime(&naive).fix();
            (naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()))).and_utc()
        })
}

/// Settings for the generative news provider.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub prompt: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            cricket_url: "https://www.yosintv.link/api/cricket.json".to_string(),
            football_url: "https://www.yosintv.link/api/football.json".to_string(),
            highlights_url: "https://yosintv-api.pages.dev/api/highlights.json".to_string(),
            streams_base_url: "https://blog.cricfoot.net".to_string(),
            alert_url: "https://yosintv-api.pages.dev/api/alert.json".to_string(),
            version_url: "https://www.yosintv.link/api/version.json".to_string(),
            stream_slug_param: "yosintv".to_string(),
            default_stream_slug: "india".to_string(),
            news: NewsConfig::default(),
            app_version: "1.0.0".to_string(),
            timeout: FETCH_TIMEOUT,
            start_zone: StartZone::default(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            prompt: "Generate 10 latest sports news articles (Cricket and Football).".to_string(),
        }
    }
}

impl FeedConfig {
    /// Load configuration from the environment (and a `.env` file if present),
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        override_from_env(&mut config.cricket_url, "MATCHFEED_CRICKET_URL");
        override_from_env(&mut config.football_url, "MATCHFEED_FOOTBALL_URL");
        override_from_env(&mut config.highlights_url, "MATCHFEED_HIGHLIGHTS_URL");
        override_from_env(&mut config.streams_base_url, "MATCHFEED_STREAMS_BASE_URL");
        override_from_env(&mut config.alert_url, "MATCHFEED_ALERT_URL");
        override_from_env(&mut config.version_url, "MATCHFEED_VERSION_URL");
        override_from_env(&mut config.stream_slug_param, "MATCHFEED_STREAM_SLUG_PARAM");
        override_from_env(&mut config.default_stream_slug, "MATCHFEED_DEFAULT_STREAM_SLUG");
        override_from_env(&mut config.app_version, "MATCHFEED_APP_VERSION");
        override_from_env(&mut config.news.endpoint, "MATCHFEED_NEWS_ENDPOINT");
        override_from_env(&mut config.news.model, "MATCHFEED_NEWS_MODEL");
        config.news.api_key = env::var("MATCHFEED_NEWS_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());

        if let Ok(raw) = env::var("MATCHFEED_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&raw)?;
        }
        if let Ok(raw) = env::var("MATCHFEED_START_ZONE") {
            config.start_zone = parse_start_zone(&raw)?;
        }

        Ok(config)
    }
}

fn override_from_env(field: &mut String, key: &str) {
    if let Ok(value) = env::var(key) {
        if !value.is_empty() {
            *field = value;
        }
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| FeedError::InvalidConfig {
            key: "MATCHFEED_TIMEOUT_SECS",
            value: raw.to_string(),
        })
}

/// `local`, `utc`, or a numeric offset such as `+05:45` / `-0300`.
fn parse_start_zone(raw: &str) -> Result<StartZone> {
    let value = raw.trim();
    match value.to_ascii_lowercase().as_str() {
        "local" => return Ok(StartZone::Local),
        "utc" | "z" => return Ok(StartZone::Utc),
        _ => {}
    }
    DateTime::parse_from_str(&format!("2000-01-01T00:00:00{value}"), "%Y-%m-%dT%H:%M:%S%z")
        .map(|dt| StartZone::Fixed(*dt.offset()))
        .map_err(|_| FeedError::InvalidConfig {
            key: "MATCHFEED_START_ZONE",
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn kathmandu() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap()
    }

    fn evening() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 10)
            .unwrap()
            .and_hms_opt(19, 45, 0)
            .unwrap()
    }

    #[test]
    fn start_zone_defaults_to_local() {
        assert_eq!(FeedConfig::default().start_zone, StartZone::Local);
        assert_eq!(
            StartZone::Local.resolve(evening()),
            Local
                .from_local_datetime(&evening())
                .earliest()
                .unwrap()
                .with_timezone(&Utc)
        );
    }

    #[test]
    fn fixed_zone_shifts_wall_clock() {
        assert_eq!(
            StartZone::Fixed(kathmandu()).resolve(evening()),
            Utc.with_ymd_and_hms(2026, 4, 10, 14, 0, 0).unwrap()
        );
        assert_eq!(
            StartZone::Utc.resolve(evening()),
            Utc.with_ymd_and_hms(2026, 4, 10, 19, 45, 0).unwrap()
        );
    }

    #[test]
    fn parses_start_zone_values() {
        assert_eq!(parse_start_zone("LOCAL").unwrap(), StartZone::Local);
        assert_eq!(parse_start_zone("utc").unwrap(), StartZone::Utc);
        assert_eq!(
            parse_start_zone("+05:45").unwrap(),
            StartZone::Fixed(kathmandu())
        );
        assert_eq!(
            parse_start_zone("+0545").unwrap(),
            StartZone::Fixed(kathmandu())
        );
        assert!(matches!(
            parse_start_zone("Mars/Olympus"),
            Err(FeedError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn from_env_applies_overrides() {
        env::set_var("MATCHFEED_CRICKET_URL", "http://localhost:9/cricket.json");
        env::set_var("MATCHFEED_APP_VERSION", "2.3.4");
        env::set_var("MATCHFEED_TIMEOUT_SECS", "3");
        env::set_var("MATCHFEED_START_ZONE", "+05:45");
        env::set_var("MATCHFEED_NEWS_API_KEY", "k-123");

        let config = FeedConfig::from_env();

        for key in [
            "MATCHFEED_CRICKET_URL",
            "MATCHFEED_APP_VERSION",
            "MATCHFEED_TIMEOUT_SECS",
            "MATCHFEED_START_ZONE",
            "MATCHFEED_NEWS_API_KEY",
        ] {
            env::remove_var(key);
        }

        let config = config.unwrap();
        assert_eq!(config.cricket_url, "http://localhost:9/cricket.json");
        assert_eq!(config.football_url, FeedConfig::default().football_url);
        assert_eq!(config.app_version, "2.3.4");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.start_zone, StartZone::Fixed(kathmandu()));
        assert_eq!(config.news.api_key.as_deref(), Some("k-123"));
    }

    #[test]
    fn default_timeout_is_ten_seconds() {
        assert_eq!(FeedConfig::default().timeout, Duration::from_secs(10));
    }

    #[test]
    fn parses_timeout_seconds() {
        assert_eq!(parse_timeout(" 4 ").unwrap(), Duration::from_secs(4));
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        assert!(matches!(
            parse_timeout("0"),
            Err(FeedError::InvalidConfig { .. })
        ));
        assert!(matches!(
            parse_timeout("soon"),
            Err(FeedError::InvalidConfig { .. })
        ));
    }
}
