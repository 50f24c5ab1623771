//! Live / upcoming / ended classification of a match at a given instant.
//!
//! Nothing here is stored: callers re-evaluate on every tick, so transitions
//! between states fall out of the clock alone.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::model::{Match, DEFAULT_DURATION_HOURS};

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

/// Where a match sits relative to "now".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum MatchStatus {
    Live,
    Upcoming,
    Ended,
}

/// Which countdown layout to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStyle {
    /// Drops the hour field when less than an hour remains.
    List,
    /// Always `HH MM SS`.
    Detail,
}

/// Instant at which a match starting at `start` and lasting `duration_hours` ends.
pub fn match_end(start: DateTime<Utc>, duration_hours: f64) -> DateTime<Utc> {
    let hours = if duration_hours.is_finite() && duration_hours > 0.0 {
        duration_hours
    } else {
        DEFAULT_DURATION_HOURS
    };
    let millis = (hours * MILLIS_PER_HOUR as f64).round() as i64;
    TimeDelta::try_milliseconds(millis)
        .and_then(|delta| start.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Classify a match. Both ends of the live window are inclusive.
pub fn classify(now: DateTime<Utc>, start: DateTime<Utc>, duration_hours: f64) -> MatchStatus {
    if now < start {
        MatchStatus::Upcoming
    } else if now <= match_end(start, duration_hours) {
        MatchStatus::Live
    } else {
        MatchStatus::Ended
    }
}

/// Time left until kick-off, or `None` once the start has passed.
pub fn countdown(now: DateTime<Utc>, start: DateTime<Utc>, style: CountdownStyle) -> Option<String> {
    let diff = (start - now).num_milliseconds();
    if diff <= 0 {
        return None;
    }

    let hours = diff / MILLIS_PER_HOUR;
    let minutes = (diff % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (diff % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;

    match style {
        CountdownStyle::List if hours == 0 => Some(format!("{minutes:02}M {seconds:02}S")),
        _ => Some(format!("{hours:02}H {minutes:02}M {seconds:02}S")),
    }
}

impl Match {
    /// Start plus duration; see [`match_end`].
    pub fn end(&self) -> DateTime<Utc> {
        match_end(self.start, self.duration_hours)
    }

    /// Where this match stands at `now`.
    pub fn status(&self, now: DateTime<Utc>) -> MatchStatus {
        classify(now, self.start, self.duration_hours)
    }

    /// Time left until kick-off, `None` once started.
    pub fn countdown(&self, now: DateTime<Utc>, style: CountdownStyle) -> Option<String> {
        countdown(now, self.start, style)
    }
}
