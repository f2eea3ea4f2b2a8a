//! pulseboard - terminal dashboard demo
//!
//! Two pages rendered in the terminal:
//! - Index: Dashboard / Analytics / Settings tabs with a counter, a live
//!   clock, a simulated weather panel and static charts
//! - About: mission statement and team list
//!
//! Usage: pulseboard [--theme light|dark] [--weather-delay-ms MS]

mod app;
mod config;
mod dashboard;
mod error;
mod logging;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::{Accent, Config};
use crossterm::event::{self, Event, KeyEventKind};
use dashboard::{SharedWeatherSource, SimulatedWeather, ThemeMode};
use ratatui::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal dashboard with a counter, clock, simulated weather and charts
#[derive(Debug, Parser)]
#[command(name = "pulseboard", version, about)]
struct Args {
    /// Initial theme mode
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Accent palette
    #[arg(long, value_enum)]
    accent: Option<Accent>,

    /// Delay of the simulated weather fetch, in milliseconds
    #[arg(long, value_name = "MS")]
    weather_delay_ms: Option<u64>,

    /// Make the simulated weather fetch fail
    #[arg(long)]
    fail_weather: bool,

    /// Config file (default: ~/.config/pulseboard/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    /// Layer command line overrides on top of the file config
    fn apply(&self, config: &mut Config) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(accent) = self.accent {
            config.accent = accent;
        }
        if let Some(delay) = self.weather_delay_ms {
            config.weather.delay_ms = delay;
        }
        if self.fail_weather {
            config.weather.simulate_failure = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    // Run the application
    let result = run_app(&args);

    if let Err(e) = result {
        tracing::error!("Fatal: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    args.apply(&mut config);
    tracing::info!("Effective config: {:?}", config);

    let weather = if config.weather.simulate_failure {
        SimulatedWeather::failing(config.weather.delay())
    } else {
        SimulatedWeather::new(config.weather.delay())
    }
    .with_condition(config.weather.condition);

    // Setup terminal; a partial setup is undone before bailing out
    install_panic_hook();
    let mut terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(e) => {
            ratatui::restore();
            return Err(e).context("Failed to setup terminal");
        }
    };

    // Create application state (mounts the index page)
    let mut app = App::new(config, SharedWeatherSource::new(weather));

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    ratatui::try_restore().context("Failed to restore terminal")?;

    tracing::info!("pulseboard exiting");
    result
}

/// Leave raw mode and the alternate screen before the default panic output
fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        previous_hook(panic_info);
    }));
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply clock ticks and weather results from background tasks
        app.drain_events();

        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll for events with timeout (keeps the clock and spinner moving)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
