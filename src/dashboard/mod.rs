//! Dashboard widgets
//!
//! Each widget owns its local state and never talks to another widget:
//! - Counter and theme toggle (synchronous)
//! - Clock, driven by a periodic ticker task
//! - Weather panel, fed by an injected asynchronous source
//! - Static chart datasets
//!
//! Async producers post [`DashboardEvent`]s; the main loop applies them.

pub mod charts;
pub mod clock;
pub mod counter;
pub mod page;
pub mod theme_toggle;
pub mod weather;

pub use clock::Clock;
pub use counter::Counter;
pub use page::IndexPage;
pub use theme_toggle::{ThemeMode, ThemeToggle};
pub use weather::{
    Condition, SharedWeatherSource, SimulatedWeather, WeatherReading, WeatherState,
    WeatherWidget,
};

use crate::error::WeatherError;
use chrono::{DateTime, Local};

/// Messages from background tasks to the main loop
#[derive(Debug)]
pub enum DashboardEvent {
    ClockTick(DateTime<Local>),
    WeatherResolved {
        mount_id: u64,
        result: Result<WeatherReading, WeatherError>,
    },
}
