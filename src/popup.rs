//! Cooldown gating for the alert and update popups.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::{AlertData, UpdateEntry};

const ALERT_KEY: &str = "alert_popup";
const UPDATE_KEY: &str = "update_popup";
const DEFAULT_ALERT_COOLDOWN_HOURS: f64 = 24.0;

/// The update popup is shown at most once per hour.
pub const UPDATE_COOLDOWN: TimeDelta = TimeDelta::hours(1);
/// How long a shown update popup stays up.
pub const UPDATE_AUTO_DISMISS: Duration = Duration::from_secs(30);
/// How often a running app re-checks the version manifest.
pub const UPDATE_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Where "last shown" markers are kept between checks.
pub trait CooldownStore: Send + Sync {
    fn last_shown(&self, key: &str) -> Option<DateTime<Utc>>;
    fn mark_shown(&self, key: &str, at: DateTime<Utc>);
}

impl<T: CooldownStore + ?Sized> CooldownStore for &T {
    fn last_shown(&self, key: &str) -> Option<DateTime<Utc>> {
        (**self).last_shown(key)
    }

    fn mark_shown(&self, key: &str, at: DateTime<Utc>) {
        (**self).mark_shown(key, at)
    }
}

impl<T: CooldownStore + ?Sized> CooldownStore for Arc<T> {
    fn last_shown(&self, key: &str) -> Option<DateTime<Utc>> {
        (**self).last_shown(key)
    }

    fn mark_shown(&self, key: &str, at: DateTime<Utc>) {
        (**self).mark_shown(key, at)
    }
}

/// In-memory markers that live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCooldownStore {
    markers: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store, created on first access and never torn down.
    pub fn global() -> &'static MemoryCooldownStore {
        static STORE: OnceLock<MemoryCooldownStore> = OnceLock::new();
        STORE.get_or_init(MemoryCooldownStore::new)
    }
}

impl CooldownStore for MemoryCooldownStore {
    fn last_shown(&self, key: &str) -> Option<DateTime<Utc>> {
        self.markers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .copied()
    }

    fn mark_shown(&self, key: &str, at: DateTime<Utc>) {
        self.markers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), at);
    }
}

/// A named "show at most once per `period`" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    pub key: &'static str,
    pub period: TimeDelta,
}

impl Cooldown {
    pub fn is_ready(&self, store: &dyn CooldownStore, now: DateTime<Utc>) -> bool {
        store
            .last_shown(self.key)
            .is_none_or(|last| now - last >= self.period)
    }

    pub fn record(&self, store: &dyn CooldownStore, now: DateTime<Utc>) {
        store.mark_shown(self.key, now);
    }
}

pub fn update_cooldown() -> Cooldown {
    Cooldown {
        key: UPDATE_KEY,
        period: UPDATE_COOLDOWN,
    }
}

impl AlertData {
    pub fn cooldown(&self) -> Cooldown {
        let hours = match self.show_frequency.cooldown_hours {
            h if h.is_finite() && h > 0.0 => h,
            _ => DEFAULT_ALERT_COOLDOWN_HOURS,
        };
        Cooldown {
            key: ALERT_KEY,
            period: TimeDelta::try_milliseconds((hours * 3_600_000.0) as i64)
                .unwrap_or(TimeDelta::MAX),
        }
    }

    /// Whether the popup should appear now. Only `once_per_day` alerts are rate limited.
    pub fn should_show(&self, store: &dyn CooldownStore, now: DateTime<Utc>) -> bool {
        self.is_active()
            && (!self.show_frequency.once_per_day || self.cooldown().is_ready(store, now))
    }
}

impl UpdateEntry {
    /// How long the popup announcing this entry stays up.
    pub fn auto_dismiss(&self) -> Duration {
        UPDATE_AUTO_DISMISS
    }
}

/// The manifest entry flagged `latest`, if it differs from the running version.
pub fn find_update<'a>(entries: &'a [UpdateEntry], current_version: &str) -> Option<&'a UpdateEntry> {
    entries
        .iter()
        .find(|entry| entry.latest)
        .filter(|entry| entry.version != current_version)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::ShowFrequency;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
    }

    fn alert(once_per_day: bool, cooldown_hours: f64) -> AlertData {
        AlertData {
            status: "active".to_string(),
            last_updated: String::new(),
            daily_message: "hello".to_string(),
            show_frequency: ShowFrequency {
                once_per_day,
                cooldown_hours,
            },
            channels: vec![],
            ui_config: Default::default(),
        }
    }

    fn entry(version: &str, latest: bool) -> UpdateEntry {
        UpdateEntry {
            version: version.to_string(),
            latest,
            message: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn cooldown_blocks_until_period_elapses() {
        let store = MemoryCooldownStore::new();
        let gate = update_cooldown();
        assert!(gate.is_ready(&store, now()));
        gate.record(&store, now());
        assert!(!gate.is_ready(&store, now() + TimeDelta::minutes(59)));
        assert!(gate.is_ready(&store, now() + TimeDelta::hours(1)));
    }

    #[test]
    fn alert_cooldown_applies_only_once_per_day() {
        let store = MemoryCooldownStore::new();
        let daily = alert(true, 12.0);
        daily.cooldown().record(&store, now());
        assert!(!daily.should_show(&store, now() + TimeDelta::hours(11)));
        assert!(daily.should_show(&store, now() + TimeDelta::hours(12)));

        let always = alert(false, 12.0);
        assert!(always.should_show(&store, now()));
    }

    #[test]
    fn zero_cooldown_defaults_to_a_day() {
        assert_eq!(alert(true, 0.0).cooldown().period, TimeDelta::hours(24));
    }

    #[test]
    fn inactive_alert_never_shows() {
        let mut paused = alert(false, 1.0);
        paused.status = "paused".to_string();
        assert!(!paused.should_show(&MemoryCooldownStore::new(), now()));
    }

    #[test]
    fn update_requires_latest_and_different_version() {
        let entries = vec![entry("0.9.0", false), entry("1.1.0", true)];
        assert_eq!(find_update(&entries, "1.0.0").map(|e| e.version.as_str()), Some("1.1.0"));
        assert_eq!(find_update(&entries, "1.1.0"), None);
        assert_eq!(find_update(&[entry("2.0.0", false)], "1.0.0"), None);
    }

    #[test]
    fn update_popup_dismisses_after_thirty_seconds() {
        assert_eq!(entry("1.1.0", true).auto_dismiss(), Duration::from_secs(30));
    }

    #[test]
    fn shared_handles_see_the_same_markers() {
        let store = Arc::new(MemoryCooldownStore::new());
        let gate = update_cooldown();
        gate.record(&Arc::clone(&store), now());
        assert!(!gate.is_ready(&store, now()));
        assert!(!gate.is_ready(&store.as_ref(), now()));
    }

    #[test]
    fn global_store_is_shared() {
        MemoryCooldownStore::global().mark_shown("global-test", now());
        assert_eq!(
            MemoryCooldownStore::global().last_shown("global-test"),
            Some(now())
        );
    }
}
