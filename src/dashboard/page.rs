//! The index page: owns every stateful widget shown on the dashboard
//!
//! Mounting starts the clock and issues the weather fetch. Unmounting
//! tears both down and drops the counter, like leaving the page would.

use crate::dashboard::{Clock, Counter, DashboardEvent, SharedWeatherSource, WeatherWidget};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

pub struct IndexPage {
    pub counter: Counter,
    pub clock: Clock,
    pub weather: WeatherWidget,
    clock_period: Duration,
    mounted: bool,
}

impl IndexPage {
    pub fn new(clock_format: &str, clock_period: Duration) -> Self {
        Self {
            counter: Counter::new(),
            clock: Clock::new(clock_format),
            weather: WeatherWidget::new(),
            clock_period,
            mounted: false,
        }
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self, source: &SharedWeatherSource, tx: &UnboundedSender<DashboardEvent>) {
        if self.mounted {
            return;
        }

        self.counter = Counter::new();
        self.clock.activate(self.clock_period, tx.clone());
        self.weather.mount(source, tx.clone());
        self.mounted = true;
        tracing::info!("Index page mounted");
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }

        self.clock.deactivate();
        self.weather.unmount();
        self.mounted = false;
        tracing::info!("Index page unmounted");
    }

    /// Route a background event to the widget it belongs to
    pub fn apply(&mut self, event: DashboardEvent) {
        if !self.mounted {
            tracing::debug!("Ignoring {:?} while unmounted", event);
            return;
        }

        match event {
            DashboardEvent::ClockTick(now) => self.clock.on_tick(now),
            DashboardEvent::WeatherResolved { mount_id, result } => {
                self.weather.resolve(mount_id, result)
            }
        }
    }
}
