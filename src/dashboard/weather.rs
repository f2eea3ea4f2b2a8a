//! Weather capability and the widget that consumes it
//!
//! The widget issues at most one request per mount through an injected
//! [`WeatherSource`]. The shipped source is [`SimulatedWeather`], which waits
//! a fixed delay and returns a constant reading.

use crate::dashboard::DashboardEvent;
use crate::error::WeatherError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Sky condition of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::Cloudy => "Cloudy",
            Condition::Rainy => "Rainy",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Condition::Sunny => "☀",
            Condition::Cloudy => "☁",
            Condition::Rainy => "☂",
        }
    }
}

/// One weather observation. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// Degrees Celsius
    pub temperature: f64,
    pub condition: Condition,
    /// Relative humidity in percent
    pub humidity: u8,
    /// km/h
    pub wind_speed: f64,
}

impl WeatherReading {
    /// The constant reading returned by the simulated source
    pub fn simulated() -> Self {
        Self {
            temperature: 22.0,
            condition: Condition::Sunny,
            humidity: 45,
            wind_speed: 12.0,
        }
    }

    pub fn formatted_temperature(&self) -> String {
        format!("{:.0}°C", self.temperature)
    }
}

/// Asynchronous source of weather readings
#[trait_variant::make(WeatherSource: Send)]
#[allow(dead_code)]
pub trait LocalWeatherSource {
    async fn fetch_weather(&self) -> Result<WeatherReading, WeatherError>;
}

/// Stand-in for a network call: waits `delay`, then answers
#[derive(Debug, Clone)]
pub struct SimulatedWeather {
    delay: Duration,
    fail: bool,
    condition: Condition,
}

impl SimulatedWeather {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail: false,
            condition: Condition::default(),
        }
    }

    /// Resolve with `FetchFailed` instead of a reading
    pub fn failing(delay: Duration) -> Self {
        Self {
            fail: true,
            ..Self::new(delay)
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }
}

impl WeatherSource for SimulatedWeather {
    async fn fetch_weather(&self) -> Result<WeatherReading, WeatherError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(WeatherError::fetch_failed("simulated outage"));
        }
        Ok(WeatherReading {
            condition: self.condition,
            ..WeatherReading::simulated()
        })
    }
}

type FetchFuture = Pin<Box<dyn Future<Output = Result<WeatherReading, WeatherError>> + Send>>;

/// Type-erased, cloneable handle to any [`WeatherSource`]
#[derive(Clone)]
pub struct SharedWeatherSource {
    fetch: Arc<dyn Fn() -> FetchFuture + Send + Sync>,
}

impl SharedWeatherSource {
    pub fn new<S>(source: S) -> Self
    where
        S: WeatherSource + Sync + 'static,
    {
        let source = Arc::new(source);
        Self {
            fetch: Arc::new(move || -> FetchFuture {
                let source = Arc::clone(&source);
                Box::pin(async move { WeatherSource::fetch_weather(&*source).await })
            }),
        }
    }

    pub fn fetch(&self) -> FetchFuture {
        (self.fetch)()
    }
}

/// Weather widget state machine
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherState {
    Idle,
    Loading,
    Loaded(WeatherReading),
    Failed(String),
}

impl WeatherState {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherState::Idle => "idle",
            WeatherState::Loading => "loading",
            WeatherState::Loaded(_) => "loaded",
            WeatherState::Failed(_) => "failed",
        }
    }
}

pub struct WeatherWidget {
    state: WeatherState,
    /// Identifies the current mount so results of an aborted fetch are dropped
    mount_id: u64,
    task: Option<JoinHandle<()>>,
}

impl WeatherWidget {
    pub fn new() -> Self {
        Self {
            state: WeatherState::Idle,
            mount_id: 0,
            task: None,
        }
    }

    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    #[cfg(test)]
    pub fn reading(&self) -> Option<&WeatherReading> {
        match &self.state {
            WeatherState::Loaded(reading) => Some(reading),
            _ => None,
        }
    }

    /// Issue the fetch for this mount.
    ///
    /// Returns `false` without issuing anything if a fetch already happened
    /// since the last unmount.
    pub fn mount(
        &mut self,
        source: &SharedWeatherSource,
        tx: UnboundedSender<DashboardEvent>,
    ) -> bool {
        if self.state != WeatherState::Idle {
            tracing::debug!(
                "Weather already {} for this mount, not refetching",
                self.state.label()
            );
            return false;
        }

        self.mount_id += 1;
        self.state = WeatherState::Loading;

        let mount_id = self.mount_id;
        let request = source.fetch();
        self.task = Some(tokio::spawn(async move {
            let result = request.await;
            if let Err(e) = &result {
                tracing::warn!("Weather fetch failed: {}", e);
            }
            let _ = tx.send(DashboardEvent::WeatherResolved { mount_id, result });
        }));

        tracing::info!("Weather fetch issued (mount {})", mount_id);
        true
    }

    /// Apply a fetch result. Stale results from an earlier mount are ignored.
    pub fn resolve(&mut self, mount_id: u64, result: Result<WeatherReading, WeatherError>) {
        if mount_id != self.mount_id || self.state != WeatherState::Loading {
            tracing::debug!("Dropping stale weather result from mount {}", mount_id);
            return;
        }

        self.task = None;
        self.state = match result {
            Ok(reading) => WeatherState::Loaded(reading),
            Err(e) => WeatherState::Failed(e.to_string()),
        };
    }

    /// Cancel any in-flight fetch and forget the reading
    pub fn unmount(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Aborted in-flight weather fetch (mount {})", self.mount_id);
        }
        self.state = WeatherState::Idle;
    }
}

impl Drop for WeatherWidget {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
