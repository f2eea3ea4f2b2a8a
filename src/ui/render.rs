//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with title, clock and tab bar
//! - Active page / tab content
//! - Footer and status bar
//! - Popups and overlays

use crate::app::{App, PopupState};
use crate::config::Accent;
use crate::dashboard::charts::{GROUP_SHARES, MONTHLY_VALUES};
use crate::dashboard::WeatherState;
use crate::types::{Page, Tab, MISSION, TEAM};
use crate::ui::{theme::Theme, widgets};
use chrono::{Datelike, Local};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;

    frame.render_widget(Block::default().style(theme.block_style()), area);

    // Main layout: header, content, footer, status bar
    let layout = Layout::vertical([
        Constraint::Length(3), // Header + tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Footer
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);

    match app.page {
        Page::Index => render_tab_content(frame, app, layout[1]),
        Page::About => render_about_page(frame, app, layout[1]),
    }

    // Rows the layout could not fit come back with zero height
    if !layout[2].is_empty() {
        render_footer(frame, app, layout[2]);
    }
    if !layout[3].is_empty() {
        render_status_bar(frame, app, layout[3]);
    }
    render_popups(frame, app, area);
}

/// Render header with app title, clock and tab bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} · {} ", app.config.title, app.page.label()))
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    if area.height < 2 {
        return;
    }

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };

    if app.page == Page::Index {
        let tab_titles: Vec<Line> = Tab::all()
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let style = if app.active_tab == *tab {
                    theme.tab_active()
                } else {
                    theme.tab_inactive()
                };
                Line::styled(format!("[{}] {}", i + 1, tab.label()), style)
            })
            .collect();

        let clock_text = Line::raw(app.index.clock.display());
        let clock_width = clock_text.width() as u16 + 1;
        let [tabs_area, clock_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(clock_width)]).areas(inner);

        let tabs = Tabs::new(tab_titles)
            .select(app.active_tab.index())
            .divider(" │ ")
            .style(theme.text());
        frame.render_widget(tabs, tabs_area);

        let clock = Paragraph::new(clock_text)
            .style(theme.text_dim())
            .alignment(Alignment::Right);
        frame.render_widget(clock, clock_area);
    } else {
        let back = Paragraph::new("[a] Back to dashboard").style(theme.text_dim());
        frame.render_widget(back, inner);
    }
}

/// Render the active tab's content
fn render_tab_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.active_tab {
        Tab::Dashboard => render_dashboard_tab(frame, app, area),
        Tab::Analytics => render_analytics_tab(frame, app, area),
        Tab::Settings => render_settings_tab(frame, app, area),
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = Paragraph::new(format!(
        "© {} {}. All rights reserved.",
        Local::now().year(),
        app.config.title
    ))
    .style(app.theme.text_dim())
    .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let hints = match (app.page, app.active_tab) {
        (Page::About, _) => "[a/Esc] Back  [t] Theme  [?] Help  [q] Quit",
        (Page::Index, Tab::Dashboard) => "[+/-] Counter  [t] Theme  [a] About  [?] Help  [q] Quit",
        (Page::Index, Tab::Analytics) => "[Tab] Next Tab  [t] Theme  [a] About  [?] Help  [q] Quit",
        (Page::Index, Tab::Settings) => "[j/k] Navigate  [Enter] Change  [?] Help  [q] Quit",
    };

    let mode = format!("{} · {}", app.theme_mode().as_str(), app.accent.as_str());
    widgets::render_status_bar(frame, hints, &mode, theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if app.popup == PopupState::Help {
        widgets::render_help_popup(frame, theme, area);
    }

    // Flash message (success/error feedback)
    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}

// === TAB RENDERERS ===

/// Card block shared by every panel
fn card<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border())
}

/// Dashboard tab: welcome card with the counter, and the weather panel
fn render_dashboard_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let [welcome_area, weather_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let welcome = vec![
        Line::raw(""),
        Line::styled(
            "This is an enhanced application with placeholder content.",
            theme.text_dim(),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[-]  ", theme.title()),
            Span::styled(format!("Count: {}", app.index.counter.value()), theme.emphasis()),
            Span::styled("  [+]", theme.title()),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Local time  ", theme.text_dim()),
            Span::styled(app.index.clock.display(), theme.text()),
        ]),
    ];

    let welcome_widget = Paragraph::new(welcome)
        .block(card("Welcome to Your Dashboard", theme))
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(welcome_widget, welcome_area);

    render_weather_panel(frame, app, weather_area);
}

fn render_weather_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let content = match app.index.weather.state() {
        WeatherState::Idle => vec![Line::styled("Weather not requested", theme.text_dim())],
        WeatherState::Loading => vec![Line::from(vec![
            Span::styled(widgets::spinner_frame(), theme.title()),
            Span::styled(" Loading weather...", theme.text()),
        ])],
        WeatherState::Loaded(reading) => vec![
            Line::from(vec![
                Span::styled(format!("{} ", reading.condition.icon()), theme.warning()),
                Span::styled(reading.formatted_temperature(), theme.emphasis()),
                Span::styled(format!("  {}", reading.condition.as_str()), theme.text()),
            ]),
            Line::raw(""),
            Line::styled(format!("Humidity    {}%", reading.humidity), theme.text_dim()),
            Line::styled(format!("Wind        {:.0} km/h", reading.wind_speed), theme.text_dim()),
        ],
        WeatherState::Failed(reason) => vec![
            Line::styled(format!("✗ {}", reason), theme.error()),
            Line::raw(""),
            Line::styled("Reopen the page to try again", theme.text_dim()),
        ],
    };

    let mut lines = vec![Line::raw("")];
    lines.extend(content);

    let widget = Paragraph::new(lines)
        .block(card("Weather", theme))
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

/// Analytics tab: line chart and pie chart side by side
fn render_analytics_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let [line_area, pie_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    widgets::render_line_chart(frame, "Analytics Overview", MONTHLY_VALUES, theme, line_area);
    widgets::render_pie_chart(frame, "Distribution", GROUP_SHARES, theme, pie_area);
}

/// Settings tab: theme and read-only runtime options
fn render_settings_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = card("Settings", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = [
        ("Theme mode", app.theme_mode().as_str().to_string()),
        ("Accent", accent_choices(app.accent)),
        ("Clock format", app.config.clock.format.clone()),
        ("Weather delay", format!("{} ms", app.config.weather.delay_ms)),
    ];

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i == app.settings_selected {
                theme.selected()
            } else {
                theme.text()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {:<16}", label), style),
                Span::styled(value.clone(), style),
            ]))
        })
        .collect();

    let [list_area, note_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    frame.render_widget(List::new(items).style(theme.text()), list_area);
    frame.render_widget(
        Paragraph::new("Changes last until exit; edit config.toml to keep them.")
            .style(theme.text_dim()),
        note_area,
    );
}

/// Every accent on one line, the active one bracketed
fn accent_choices(active: Accent) -> String {
    Accent::all()
        .iter()
        .map(|accent| {
            if *accent == active {
                format!("[{}]", accent.as_str())
            } else {
                accent.as_str().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// About page: mission and team cards
fn render_about_page(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let [mission_area, team_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(4)]).areas(area);

    let mission = Paragraph::new(MISSION)
        .block(card("Our Mission", theme))
        .style(theme.text())
        .wrap(Wrap { trim: true });
    frame.render_widget(mission, mission_area);

    let mut lines = vec![
        Line::styled("Meet the people behind our success", theme.text_dim()),
        Line::raw(""),
    ];
    lines.extend(TEAM.iter().map(|member| {
        Line::from(vec![
            Span::styled("• ", theme.title()),
            Span::styled(member.name, theme.emphasis()),
            Span::styled(format!(" - {}", member.role), theme.text()),
        ])
    }));

    let team = Paragraph::new(lines)
        .block(card("Our Team", theme))
        .style(theme.text());
    frame.render_widget(team, team_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dashboard::{SharedWeatherSource, SimulatedWeather};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let source = SharedWeatherSource::new(SimulatedWeather::new(Duration::from_secs(2)));
        App::new(Config::default(), source)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shell_renders_header_tabs_footer() {
        let app = app();
        let text = draw(&app, 100, 30);

        assert!(text.contains("My Enhanced App"));
        assert!(text.contains("Dashboard"));
        assert!(text.contains("Analytics"));
        assert!(text.contains("Settings"));
        assert!(text.contains("All rights reserved."));
        assert!(text.contains("Welcome to Your Dashboard"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analytics_tab_renders_charts() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        let text = draw(&app, 100, 30);

        assert!(text.contains("Analytics Overview"));
        assert!(text.contains("Distribution"));
        assert!(text.contains("Group D"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_tab_renders_rows() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        let text = draw(&app, 100, 30);

        assert!(text.contains("Theme mode"));
        assert!(text.contains("[Blue] Yellow Green Purple"));
        assert!(text.contains("2000 ms"));
        assert!(text.contains("%H:%M:%S"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_about_page_lists_team() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        let text = draw(&app, 100, 30);

        assert!(text.contains("Our Team"));
        for member in TEAM {
            assert!(text.contains(member.name));
        }
        assert!(!text.contains("Welcome to Your Dashboard"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_terminal_does_not_panic() {
        let mut app = app();
        draw(&app, 20, 6);
        press(&mut app, KeyCode::Char('?'));
        draw(&app, 20, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_short_height_renders() {
        let mut app = app();
        // Theme toggle leaves a flash message on screen
        press(&mut app, KeyCode::Char('t'));

        for height in 1..=14 {
            draw(&app, 80, height);
        }

        press(&mut app, KeyCode::Char('?'));
        for height in 1..=14 {
            draw(&app, 80, height);
        }

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('a'));
        for height in 1..=14 {
            draw(&app, 80, height);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_header_clock_fits_long_format() {
        let mut config = Config::default();
        config.clock.format = "%Y-%m-%d %H:%M:%S".to_string();
        let source = SharedWeatherSource::new(SimulatedWeather::new(Duration::from_secs(2)));
        let app = App::new(config, source);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let tab_row: String = (0..100).map(|x| buffer[(x, 1)].symbol()).collect();

        assert!(tab_row.contains(&app.index.clock.display()));
        assert!(tab_row.contains("Dashboard"));
    }
}
