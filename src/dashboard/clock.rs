//! Clock display and the ticker that drives it
//!
//! A [`Ticker`] is a periodic tokio task with an explicit start/stop
//! lifecycle. Dropping the handle cancels the task, so a clock that goes
//! out of scope can never leave a timer running.

use crate::dashboard::DashboardEvent;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::time::Duration;
use tokio::sync::{mpsc::UnboundedSender, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Default strftime pattern for the clock
pub const DEFAULT_CLOCK_FORMAT: &str = "%H:%M:%S";

/// Periodic activity that fires every `period` until stopped
pub struct Ticker {
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the ticker task.
    ///
    /// The first tick fires one full period after start. Each tick captures
    /// its own "now"; ticks missed while the runtime was stalled are skipped,
    /// not replayed. `on_tick` returning `false` ends the ticker.
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(DateTime<Local>) -> bool + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        tracing::debug!("Ticker received shutdown signal");
                        break;
                    }
                    _ = interval.tick() => {
                        if !on_tick(Local::now()) {
                            tracing::debug!("Ticker consumer went away, stopping");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Stop the ticker. No tick is delivered after this returns.
    pub fn stop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Clock widget state
pub struct Clock {
    format: String,
    now: Option<DateTime<Local>>,
    ticks: u64,
    ticker: Option<Ticker>,
}

impl Clock {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            now: None,
            ticks: 0,
            ticker: None,
        }
    }

    /// Start producing ticks into `tx`. Activating twice is a no-op.
    pub fn activate(&mut self, period: Duration, tx: UnboundedSender<DashboardEvent>) {
        if self.is_active() {
            return;
        }

        self.now = Some(Local::now());
        self.ticker = Some(Ticker::start(period, move |now| {
            tx.send(DashboardEvent::ClockTick(now)).is_ok()
        }));
        tracing::debug!("Clock activated with period {:?}", period);
    }

    pub fn deactivate(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
            tracing::debug!("Clock deactivated after {} ticks", self.ticks);
        }
    }

    pub fn is_active(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    /// Record a tick delivered by the ticker
    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.now = Some(now);
        self.ticks += 1;
    }

    #[cfg(test)]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Formatted time of the latest tick
    pub fn display(&self) -> String {
        let now = self.now.unwrap_or_else(Local::now);
        format_time(now, &self.format)
    }
}

/// Format with a user pattern, falling back to the default on a bad pattern
pub fn format_time(time: DateTime<Local>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(pattern)).is_ok() {
        return out;
    }

    tracing::warn!("Invalid clock format {:?}, using default", pattern);
    time.format(DEFAULT_CLOCK_FORMAT).to_string()
}
