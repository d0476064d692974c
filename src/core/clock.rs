//! Header clock - a periodic task that refreshes the displayed time.
//!
//! The clock only runs while the billing screen is active. [`Clock::start`] spawns the
//! ticking task and hands back a [`ClockGuard`]; dropping the guard stops the task. Readers
//! subscribe through a `watch` channel and always see the latest time.

use chrono::{DateTime, Local, TimeZone};
use std::{fmt::Display, sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, trace};

/// Formats a timestamp the way the header shows it, e.g. `Oct 18, 2026, 5:27 PM`.
#[must_use]
pub fn format_clock<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Source of the displayed time, shared with the ticking task.
#[derive(Debug, Clone)]
pub struct Clock {
    period: Duration,
    sender: Arc<watch::Sender<DateTime<Local>>>,
}

impl Clock {
    /// Creates a stopped clock refreshing every `period` once started.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let (sender, _) = watch::channel(Local::now());
        Self {
            period,
            sender: Arc::new(sender),
        }
    }

    /// Receiver of every refresh.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Local>> {
        self.sender.subscribe()
    }

    /// The last published time.
    #[must_use]
    pub fn now(&self) -> DateTime<Local> {
        *self.sender.borrow()
    }

    /// Publishes the current time immediately, then once per period until the returned
    /// guard is dropped. Must be called from within a tokio runtime.
    #[must_use = "the clock stops as soon as the guard is dropped"]
    pub fn start(&self) -> ClockGuard {
        let sender = Arc::clone(&self.sender);
        let period = self.period;
        debug!("Starting header clock with a {:?} period", period);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let now = Local::now();
                trace!("Clock tick at {}", now);
                sender.send_replace(now);
            }
        });

        ClockGuard { task }
    }
}

/// Keeps the clock task alive. Dropping it aborts the task.
#[derive(Debug)]
pub struct ClockGuard {
    task: JoinHandle<()>,
}

impl Drop for ClockGuard {
    fn drop(&mut self) {
        debug!("Stopping header clock");
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_clock() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 17, 27, 0).unwrap();
        assert_eq!(format_clock(&at), "Oct 18, 2026, 5:27 PM");

        let morning = Utc.with_ymd_and_hms(2026, 1, 5, 9, 3, 0).unwrap();
        assert_eq!(format_clock(&morning), "Jan 5, 2026, 9:03 AM");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period_while_guard_lives() {
        let clock = Clock::new(Duration::from_secs(60));
        let mut updates = clock.subscribe();
        updates.borrow_and_update();

        let guard = clock.start();
        // first tick fires immediately
        updates.changed().await.unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert!(!updates.has_changed().unwrap());

        tokio::time::advance(Duration::from_secs(30)).await;
        updates.changed().await.unwrap();

        drop(guard);
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(300)).await;
        tokio::task::yield_now().await;
        assert!(!updates.has_changed().unwrap());
    }
}
