//! Configuration management for pulseboard
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/pulseboard/config.toml
//!
//! Runtime changes (theme toggle, accent cycling) are never written back.

use crate::dashboard::clock::DEFAULT_CLOCK_FORMAT;
use crate::dashboard::{Condition, ThemeMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub theme: ThemeMode,
    pub accent: Accent,
    pub clock: ClockOptions,
    pub weather: WeatherOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "My Enhanced App".to_string(),
            theme: ThemeMode::Dark,
            accent: Accent::Blue,
            clock: ClockOptions::default(),
            weather: WeatherOptions::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("pulseboard");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load config from `path`, or write defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {:?}", path);
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        tracing::debug!("Loaded config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Accent palette. Replaces the per-color page variants with one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Blue,
    Yellow,
    Green,
    Purple,
}

impl Accent {
    pub fn all() -> &'static [Accent] {
        &[Accent::Blue, Accent::Yellow, Accent::Green, Accent::Purple]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Accent::Blue => "Blue",
            Accent::Yellow => "Yellow",
            Accent::Green => "Green",
            Accent::Purple => "Purple",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Accent::Blue => Accent::Yellow,
            Accent::Yellow => Accent::Green,
            Accent::Green => Accent::Purple,
            Accent::Purple => Accent::Blue,
        }
    }
}

/// Clock display options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockOptions {
    /// strftime pattern
    pub format: String,
    pub tick_ms: u64,
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_CLOCK_FORMAT.to_string(),
            tick_ms: 1000,
        }
    }
}

impl ClockOptions {
    /// Tick period, never shorter than 100ms
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(100))
    }
}

/// Simulated weather source options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherOptions {
    pub delay_ms: u64,
    pub simulate_failure: bool,
    /// Sky condition the simulated source reports
    pub condition: Condition,
}

impl Default for WeatherOptions {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            simulate_failure: false,
            condition: Condition::Sunny,
        }
    }
}

impl WeatherOptions {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
