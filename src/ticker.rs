use std::future::{self, Future};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::lifecycle::{CountdownStyle, MatchStatus};
use crate::model::Match;

/// Cadence at which views recompute match status and countdowns.
pub const STATUS_TICK: Duration = Duration::from_secs(1);

/// A periodic callback owned by a view. Dropping it stops the callback.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Call `on_tick` with the current time every `period`, starting immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(DateTime<Utc>) + Send + 'static,
    {
        Self::spawn_async(period, move |now| {
            on_tick(now);
            future::ready(())
        })
    }

    /// Like [`Ticker::spawn`], but each tick awaits the returned future
    /// before waiting for the next one.
    pub fn spawn_async<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(DateTime<Utc>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick(Utc::now()).await;
            }
        });
        Self { handle }
    }

    /// Recompute one match's status and countdown every [`STATUS_TICK`].
    pub fn watch_match<F>(m: Match, style: CountdownStyle, mut on_update: F) -> Self
    where
        F: FnMut(MatchStatus, Option<String>) + Send + 'static,
    {
        debug!(title = %m.title(), "watching match status");
        Self::spawn(STATUS_TICK, move |now| {
            on_update(m.status(now), m.countdown(now, style));
        })
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::TimeDelta;
    use serde_json::json;

    use super::*;
    use crate::feed::map_match;
    use crate::model::Sport;
    use crate::popup::UPDATE_POLL_INTERVAL;

    #[tokio::test(start_paused = true)]
    async fn ticks_until_dropped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let ticker = Ticker::spawn(Duration::from_secs(1), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(3_500)).await;
        assert!(ticker.is_running());
        let seen = ticks.load(Ordering::SeqCst);
        assert!(seen >= 3, "only {seen} ticks");

        drop(ticker);
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn async_ticks_follow_update_poll_interval() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let _ticker = Ticker::spawn_async(UPDATE_POLL_INTERVAL, move |_| {
            let counter = Arc::clone(&counter);
            async move {
                time::sleep(Duration::from_secs(2)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(polls.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(10 * 60)).await;
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn watch_reports_status_and_countdown() {
        let start = Utc::now() + TimeDelta::hours(3);
        let m = map_match(
            &json!({"team1": "A", "team2": "B", "start": start.to_rfc3339()}),
            Sport::Football,
            Utc::now(),
        );

        let updates = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&updates);
        let _ticker = Ticker::watch_match(m, CountdownStyle::Detail, move |status, countdown| {
            sink.lock().unwrap().push((status, countdown));
        });

        time::sleep(Duration::from_millis(1_500)).await;
        let updates = updates.lock().unwrap();
        assert!(!updates.is_empty());
        let (status, countdown) = &updates[0];
        assert_eq!(*status, MatchStatus::Upcoming);
        assert!(countdown.as_deref().is_some_and(|c| c.starts_with("02H 59M")));
    }
}
