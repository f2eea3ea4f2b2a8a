//! Theme definitions for pulseboard
//!
//! A theme is the product of a light/dark base and an accent palette.
//! Each theme defines colors for all UI elements.

use crate::config::Accent;
use crate::dashboard::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Pie sectors and chart series
    pub series: [Color; 4],
}

impl Theme {
    /// Create a theme from a mode and an accent
    pub fn new(mode: ThemeMode, accent: Accent) -> Self {
        let mut theme = match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        };
        let (accent, accent_dim) = accent_colors(accent, mode);
        theme.accent = accent;
        theme.accent_dim = accent_dim;
        theme.border_focused = accent;
        theme
    }

    /// Dark base (default)
    fn dark() -> Self {
        Self {
            // Base
            bg: Color::Rgb(40, 40, 40),           // #282828
            fg: Color::Rgb(235, 219, 178),        // #ebdbb2
            fg_dim: Color::Rgb(146, 131, 116),    // #928374

            accent: Color::Rgb(131, 165, 152),
            accent_dim: Color::Rgb(69, 133, 136),

            // Status
            success: Color::Rgb(184, 187, 38),    // #b8bb26
            warning: Color::Rgb(250, 189, 47),    // #fabd2f
            error: Color::Rgb(251, 73, 52),       // #fb4934

            // UI elements
            border: Color::Rgb(80, 73, 69),       // #504945
            border_focused: Color::Rgb(168, 153, 132),
            selection_bg: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(235, 219, 178),

            series: [
                Color::Rgb(131, 165, 152), // blue
                Color::Rgb(184, 187, 38),  // green
                Color::Rgb(250, 189, 47),  // yellow
                Color::Rgb(254, 128, 25),  // orange
            ],
        }
    }

    /// Light base
    fn light() -> Self {
        Self {
            // Base
            bg: Color::Rgb(251, 241, 199),        // #fbf1c7
            fg: Color::Rgb(60, 56, 54),           // #3c3836
            fg_dim: Color::Rgb(124, 111, 100),    // #7c6f64

            accent: Color::Rgb(7, 102, 120),
            accent_dim: Color::Rgb(69, 133, 136),

            // Status
            success: Color::Rgb(121, 116, 14),    // #79740e
            warning: Color::Rgb(181, 118, 20),    // #b57614
            error: Color::Rgb(157, 0, 6),         // #9d0006

            // UI elements
            border: Color::Rgb(213, 196, 161),    // #d5c4a1
            border_focused: Color::Rgb(102, 92, 84),
            selection_bg: Color::Rgb(213, 196, 161),
            selection_fg: Color::Rgb(40, 40, 40),

            series: [
                Color::Rgb(7, 102, 120),
                Color::Rgb(121, 116, 14),
                Color::Rgb(181, 118, 20),
                Color::Rgb(175, 58, 3),
            ],
        }
    }

    // Style helpers for common UI patterns

    /// Background fill for blocks
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Tab style (inactive)
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Tab style (active)
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Large numeric readouts (counter, temperature)
    pub fn emphasis(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).bg(self.bg)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }

    /// Color for the n-th chart series, wrapping around
    pub fn series_color(&self, n: usize) -> Color {
        self.series[n % self.series.len()]
    }
}

fn accent_colors(accent: Accent, mode: ThemeMode) -> (Color, Color) {
    match (accent, mode) {
        (Accent::Blue, ThemeMode::Dark) => (Color::Rgb(131, 165, 152), Color::Rgb(69, 133, 136)),
        (Accent::Blue, ThemeMode::Light) => (Color::Rgb(7, 102, 120), Color::Rgb(69, 133, 136)),
        (Accent::Yellow, ThemeMode::Dark) => (Color::Rgb(250, 189, 47), Color::Rgb(215, 153, 33)),
        (Accent::Yellow, ThemeMode::Light) => (Color::Rgb(181, 118, 20), Color::Rgb(215, 153, 33)),
        (Accent::Green, ThemeMode::Dark) => (Color::Rgb(184, 187, 38), Color::Rgb(152, 151, 26)),
        (Accent::Green, ThemeMode::Light) => (Color::Rgb(121, 116, 14), Color::Rgb(152, 151, 26)),
        (Accent::Purple, ThemeMode::Dark) => (Color::Rgb(211, 134, 155), Color::Rgb(177, 98, 134)),
        (Accent::Purple, ThemeMode::Light) => (Color::Rgb(143, 63, 113), Color::Rgb(177, 98, 134)),
    }
}
