//! Reusable UI widgets
//!
//! Contains common UI components used across pages and tabs:
//! - Popup dialogs and flash messages
//! - Loading spinner
//! - Line and pie charts over static datasets

use crate::dashboard::charts::{self, DataPoint, PieSlice};
use crate::ui::Theme;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap,
    },
    Frame,
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render a centered popup dialog with a single close hint on its bottom row
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    close_key: char,
    theme: &Theme,
    area: Rect,
) {
    // Calculate popup size
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));

    let popup_area = centered_rect(popup_width, popup_height, area);
    if popup_area.is_empty() {
        return;
    }

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());

    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(4),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    if popup_area.height >= 3 {
        let hint_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height - 2,
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let hint = Line::from(vec![
            Span::styled("[", Style::default().fg(theme.accent_dim)),
            Span::styled(
                close_key.to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("] ", Style::default().fg(theme.accent_dim)),
            Span::styled("Close", theme.text()),
        ]);

        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), hint_area);
    }
}

/// Render the keybinding help popup
pub fn render_help_popup(frame: &mut Frame, theme: &Theme, area: Rect) {
    let bindings = [
        ("1-3 / Tab", "Switch tabs"),
        ("+ / -", "Counter up / down"),
        ("t", "Toggle light/dark"),
        ("a", "Switch Index / About page"),
        ("j/k Enter", "Navigate / change settings"),
        ("q", "Quit"),
    ];

    let content: Vec<Line> = bindings
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", keys), theme.title()),
                Span::styled(*action, theme.text()),
            ])
        })
        .collect();

    render_popup(frame, "Help", content, 'q', theme, area);
}

/// Current spinner glyph, advancing every 100ms of wall time
pub fn spinner_frame() -> &'static str {
    let idx = (Local::now().timestamp_millis() / 100).rem_euclid(SPINNER_FRAMES.len() as i64);
    SPINNER_FRAMES[idx as usize]
}

/// Render a success flash message (bottom of screen)
pub fn render_flash_message(
    frame: &mut Frame,
    message: &str,
    is_error: bool,
    theme: &Theme,
    area: Rect,
) {
    if area.is_empty() {
        return;
    }

    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        y: area.bottom() - 1,
        height: 1,
        ..area
    };

    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message, style),
    ]));

    frame.render_widget(Clear, flash_area);
    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    if area.is_empty() {
        return;
    }

    let status_area = Rect {
        y: area.bottom() - 1,
        height: 1,
        ..area
    };

    // Clear the line first
    frame.render_widget(Clear, status_area);

    let left_widget = Paragraph::new(left_content)
        .style(theme.text_dim());

    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content)
        .style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Line chart over a static dataset, x labelled by entry name
pub fn render_line_chart(
    frame: &mut Frame,
    title: &str,
    data: &[DataPoint],
    theme: &Theme,
    area: Rect,
) {
    let points = charts::line_points(data);
    let ceiling = charts::value_ceiling(data);

    let dataset = Dataset::default()
        .name("value")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.accent))
        .data(&points);

    let x_labels: Vec<Span> = data
        .iter()
        .map(|p| Span::styled(p.name, theme.text_dim()))
        .collect();
    let y_labels: Vec<Span> = [0.0, ceiling / 2.0, ceiling]
        .iter()
        .map(|v| Span::styled(format!("{:.0}", v), theme.text_dim()))
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .style(theme.block_style())
                .title(format!(" {} ", title))
                .title_style(theme.title())
                .borders(Borders::ALL)
                .border_style(theme.border()),
        )
        .style(theme.text())
        .x_axis(
            Axis::default()
                .style(theme.text_dim())
                .bounds([0.0, data.len().saturating_sub(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.text_dim())
                .bounds([0.0, ceiling])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Pie chart with a legend on the right
pub fn render_pie_chart(
    frame: &mut Frame,
    title: &str,
    data: &[DataPoint],
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slices = charts::pie_slices(data);
    if slices.is_empty() {
        let empty = Paragraph::new("No data")
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let [pie_area, legend_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(inner);

    let sectors: Vec<(Vec<(f64, f64)>, ratatui::style::Color)> = slices
        .iter()
        .enumerate()
        .map(|(i, slice)| (sector_points(slice), theme.series_color(i)))
        .collect();

    let canvas = Canvas::default()
        .background_color(theme.bg)
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (coords, color) in &sectors {
                ctx.draw(&Points { coords, color: *color });
            }
        });
    frame.render_widget(canvas, pie_area);

    let legend: Vec<Line> = slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme.series_color(i))),
                Span::styled(format!("{:<8}", slice.name), theme.text()),
                Span::styled(format!("{:>5.1}%", slice.percent()), theme.text_dim()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend).style(theme.text()), legend_area);
}

/// Sample points filling a pie sector on the unit disc
fn sector_points(slice: &PieSlice) -> Vec<(f64, f64)> {
    const RINGS: usize = 24;
    const ANGLE_STEP: f64 = 0.02;

    let steps = (slice.sweep / ANGLE_STEP).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(RINGS * steps);
    for ring in 1..=RINGS {
        let r = ring as f64 / RINGS as f64;
        for step in 0..steps {
            let angle = slice.start + step as f64 * ANGLE_STEP;
            if !slice.contains_angle(angle) {
                break;
            }
            points.push((r * angle.cos(), r * angle.sin()));
        }
    }
    points
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width: width.min(area.width), height: height.min(area.height) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Accent;
    use crate::dashboard::charts::{GROUP_SHARES, MONTHLY_VALUES};
    use crate::dashboard::ThemeMode;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 5);
        let popup = centered_rect(40, 20, area);
        assert_eq!(popup.width, 10);
        assert_eq!(popup.height, 5);
    }

    #[test]
    fn test_sector_points_stay_in_sector() {
        for slice in charts::pie_slices(GROUP_SHARES) {
            let points = sector_points(&slice);
            assert!(!points.is_empty());
            for (x, y) in points {
                assert!(x * x + y * y <= 1.0 + 1e-9);
                let angle = y.atan2(x).rem_euclid(std::f64::consts::TAU);
                assert!(angle >= slice.start - 1e-6 && angle <= slice.start + slice.sweep + 1e-6);
            }
        }
    }

    #[test]
    fn test_bottom_rows_skip_empty_area() {
        let theme = Theme::new(ThemeMode::Dark, Accent::Blue);
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal
            .draw(|frame| {
                // What a vertical layout hands out when it runs out of rows
                let empty = Rect::new(0, 6, 20, 0);
                render_status_bar(frame, "hints", "dark", &theme, empty);
                render_flash_message(frame, "saved", false, &theme, empty);
            })
            .unwrap();

        assert!(!buffer_text(&terminal).contains("hints"));
    }

    #[test]
    fn test_status_bar_uses_last_row() {
        let theme = Theme::new(ThemeMode::Dark, Accent::Blue);
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| render_status_bar(frame, "hints", "dark", &theme, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let last_row: String = (0..30).map(|x| buffer[(x, 2)].symbol()).collect();
        assert!(last_row.starts_with("hints"));
        assert!(last_row.trim_end().ends_with("dark"));
    }

    #[test]
    fn test_help_popup_shows_close_hint() {
        let theme = Theme::new(ThemeMode::Light, Accent::Purple);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| render_help_popup(frame, &theme, frame.area()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Help"));
        assert!(text.contains("[q] Close"));
    }

    #[test]
    fn test_spinner_frame_is_known_glyph() {
        assert!(SPINNER_FRAMES.contains(&spinner_frame()));
    }

    #[test]
    fn test_pie_chart_renders_legend() {
        let theme = Theme::new(ThemeMode::Dark, Accent::Blue);
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal
            .draw(|frame| render_pie_chart(frame, "Shares", GROUP_SHARES, &theme, frame.area()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Shares"));
        assert!(text.contains("Group A"));
        assert!(text.contains("33.3%"));
    }

    #[test]
    fn test_line_chart_renders_month_labels() {
        let theme = Theme::new(ThemeMode::Light, Accent::Green);
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal
            .draw(|frame| render_line_chart(frame, "Monthly", MONTHLY_VALUES, &theme, frame.area()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Monthly"));
        assert!(text.contains("Jan"));
        assert!(text.contains("800"));
    }
}
