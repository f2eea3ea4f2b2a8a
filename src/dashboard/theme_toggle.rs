//! Light/dark theme toggle

use serde::{Deserialize, Serialize};

/// Two-valued presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Holds the active mode. Never written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeToggle {
    mode: ThemeMode,
}

impl ThemeToggle {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn toggle(&mut self) {
        self.mode = self.mode.flipped();
    }

    pub fn current(&self) -> ThemeMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips() {
        let mut toggle = ThemeToggle::new(ThemeMode::Light);
        toggle.toggle();
        assert_eq!(toggle.current(), ThemeMode::Dark);
    }

    #[test]
    fn test_toggle_is_involutive() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let mut toggle = ThemeToggle::new(mode);
            toggle.toggle();
            toggle.toggle();
            assert_eq!(toggle.current(), mode);
        }
    }
}
