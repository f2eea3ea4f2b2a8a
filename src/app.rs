//! Application state and event handling
//!
//! This is the core of pulseboard, managing:
//! - Page and tab navigation
//! - Keyboard input
//! - Events posted by background tasks (clock ticks, weather results)
//!
//! All widget state is mutated here, on the main loop. Background tasks
//! only ever send [`DashboardEvent`]s.

use crate::config::{Accent, Config};
use crate::dashboard::{DashboardEvent, IndexPage, SharedWeatherSource, ThemeMode, ThemeToggle};
use crate::types::{Page, Tab};
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

const FLASH_TTL: Duration = Duration::from_secs(3);

/// Rows on the Settings tab
pub const SETTINGS_ROWS: usize = 4;

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub page: Page,
    pub active_tab: Tab,
    pub config: Config,
    pub theme_toggle: ThemeToggle,
    pub accent: Accent,
    pub theme: Theme,

    // Index page widgets
    pub index: IndexPage,

    // Settings tab state
    pub settings_selected: usize,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)

    weather_source: SharedWeatherSource,
    events_tx: UnboundedSender<DashboardEvent>,
    events_rx: UnboundedReceiver<DashboardEvent>,
}

/// Popup overlay state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    None,
    Help,
}

impl App {
    /// Create the app and mount the index page.
    ///
    /// Must be called from within a tokio runtime: mounting spawns the
    /// clock ticker and the weather fetch.
    pub fn new(config: Config, weather_source: SharedWeatherSource) -> Self {
        let theme_toggle = ThemeToggle::new(config.theme);
        let accent = config.accent;
        let theme = Theme::new(theme_toggle.current(), accent);
        let index = IndexPage::new(&config.clock.format, config.clock.period());
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            should_quit: false,
            page: Page::Index,
            active_tab: Tab::Dashboard,
            config,
            theme_toggle,
            accent,
            theme,
            index,
            settings_selected: 0,
            popup: PopupState::None,
            flash_message: None,
            weather_source,
            events_tx,
            events_rx,
        };
        app.index.mount(&app.weather_source, &app.events_tx);
        app
    }

    /// Apply every event background tasks have posted since the last call
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.index.apply(event);
        }

        // Clear expired flash messages
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed() >= FLASH_TTL {
                self.flash_message = None;
            }
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_toggle.current()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.popup {
            PopupState::Help => self.handle_help_key(key),
            PopupState::None => self.handle_normal_key(key),
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
            self.popup = PopupState::None;
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) {
        // Global keys (work on every page)
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return;
            }
            KeyCode::Char('?') => {
                self.popup = PopupState::Help;
                return;
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                return;
            }
            KeyCode::Char('a') => {
                self.switch_page(self.page.other());
                return;
            }
            _ => {}
        }

        if self.page == Page::About {
            if key.code == KeyCode::Esc {
                self.switch_page(Page::Index);
            }
            return;
        }

        match key.code {
            KeyCode::Char('1') => self.active_tab = Tab::Dashboard,
            KeyCode::Char('2') => self.active_tab = Tab::Analytics,
            KeyCode::Char('3') => self.active_tab = Tab::Settings,
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            _ => match self.active_tab {
                Tab::Dashboard => self.handle_dashboard_key(key),
                Tab::Analytics => {}
                Tab::Settings => self.handle_settings_key(key),
            },
        }
    }

    /// Handle keys in Dashboard tab
    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                self.index.counter.increment()
            }
            KeyCode::Char('-') | KeyCode::Left => self.index.counter.decrement(),
            _ => {}
        }
    }

    /// Handle keys in Settings tab
    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings_selected < SETTINGS_ROWS - 1 {
                    self.settings_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.settings_selected {
                0 => self.toggle_theme(),
                1 => self.cycle_accent(),
                _ => self.set_flash("Set this in config.toml", true),
            },
            _ => {}
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_toggle.toggle();
        self.rebuild_theme();
        tracing::debug!("Theme toggled to {:?}", self.theme_mode());
        self.set_flash(format!("Theme: {}", self.theme_mode().as_str()), false);
    }

    pub fn cycle_accent(&mut self) {
        self.accent = self.accent.next();
        self.rebuild_theme();
        self.set_flash(format!("Accent: {}", self.accent.as_str()), false);
    }

    /// Navigate to `page`, unmounting the index page when leaving it
    pub fn switch_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }

        match page {
            Page::About => self.index.unmount(),
            Page::Index => self.index.mount(&self.weather_source, &self.events_tx),
        }
        tracing::info!("Switched page {} -> {}", self.page.label(), page.label());
        self.page = page;
    }

    pub fn quit(&mut self) {
        self.index.unmount();
        self.should_quit = true;
    }

    fn rebuild_theme(&mut self) {
        self.theme = Theme::new(self.theme_mode(), self.accent);
    }

    fn set_flash(&mut self, message: impl Into<String>, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{SimulatedWeather, WeatherState};
    use crate::ui;
    use ratatui::{backend::TestBackend, Terminal};

    const DELAY: Duration = Duration::from_secs(2);

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(source: SimulatedWeather) -> App {
        App::new(Config::default(), SharedWeatherSource::new(source))
    }

    fn app() -> App {
        app_with(SimulatedWeather::new(DELAY))
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| ui::render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_scenario() {
        let mut app = app();
        assert_eq!(app.index.counter.value(), 0);

        for _ in 0..3 {
            app.handle_key(key(KeyCode::Char('+')));
        }
        assert_eq!(app.index.counter.value(), 3);
        assert!(screen(&app).contains("Count: 3"));

        app.handle_key(key(KeyCode::Char('-')));
        assert_eq!(app.index.counter.value(), 2);
        assert!(screen(&app).contains("Count: 2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_weather_scenario() {
        let mut app = app();

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        app.drain_events();
        assert_eq!(app.index.weather.state(), &WeatherState::Loading);
        assert!(screen(&app).contains("Loading weather"));

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        app.drain_events();
        let text = screen(&app);
        assert!(text.contains("22°C"));
        assert!(text.contains("Sunny"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_weather_failure_is_shown() {
        let mut app = app_with(SimulatedWeather::failing(DELAY));

        tokio::time::sleep(DELAY * 2).await;
        app.drain_events();

        assert!(matches!(app.index.weather.state(), WeatherState::Failed(_)));
        assert!(screen(&app).contains("simulated outage"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_ticks_reach_app() {
        let mut app = app();

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        app.drain_events();
        assert_eq!(app.index.clock.ticks(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_theme_toggle_key() {
        let mut app = app();
        assert_eq!(app.theme_mode(), ThemeMode::Dark);

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.theme_mode(), ThemeMode::Light);
        assert_eq!(app.theme.bg, Theme::new(ThemeMode::Light, Accent::Blue).bg);

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.theme_mode(), ThemeMode::Dark);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_navigation() {
        let mut app = app();

        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.active_tab, Tab::Analytics);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.active_tab, Tab::Settings);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.active_tab, Tab::Dashboard);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_keys_only_on_dashboard() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('3')));
        app.handle_key(key(KeyCode::Char('+')));
        assert_eq!(app.index.counter.value(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_cycle_accent() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('3')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.accent, Accent::Yellow);
        assert!(app.flash_message.is_some());
        // Runtime changes stay out of the loaded config
        assert_eq!(app.config.accent, Accent::Blue);
    }

    #[tokio::test(start_paused = true)]
    async fn test_about_page_unmounts_index() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('+')));

        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.page, Page::About);
        assert!(!app.index.is_mounted());
        assert!(!app.index.clock.is_active());
        assert!(screen(&app).contains("Our Mission"));

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.page, Page::Index);
        assert_eq!(app.index.counter.value(), 0);
        assert_eq!(app.index.weather.state(), &WeatherState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_popup() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.popup, PopupState::Help);
        assert!(screen(&app).contains("Help"));

        // 'q' closes the popup instead of quitting
        app.handle_key(key(KeyCode::Char('q')));
        assert_eq!(app.popup, PopupState::None);
        assert!(!app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_stops_clock() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
        assert!(!app.index.clock.is_active());
    }
}
