mod surface;

use std::sync::OnceLock;
use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::driver::DriverState;
use crate::render::fmt_num;
use crate::theme::Theme;

// Load theme colors from system (Omarchy/Hyprland) once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn paused() -> Color { theme().paused }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }

pub fn draw(f: &mut Frame, app: &App) {
    let now = Instant::now();
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(5),    // Surface
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_surface_box(f, app, now, chunks[1]);
    draw_footer(f, app, chunks[2]);

    if app.show_help {
        draw_help_popup(f, app);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let values: Vec<String> = app.driver.dataset().values().iter().map(|v| fmt_num(*v)).collect();

    let (badge, badge_color) = if app.is_paused() {
        ("❚❚ paused", paused())
    } else {
        match app.driver.state() {
            DriverState::Initialized => ("● waiting", text_dim()),
            DriverState::Cycling => ("● cycling", accent()),
        }
    };

    let mut spans = vec![
        Span::styled(badge, Style::default().fg(badge_color).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ", Style::default().fg(text_dim())),
        Span::styled(format!("[{}]", values.join(", ")), Style::default().fg(text())),
    ];
    if let Some(ref status) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(text_dim())));
        spans.push(Span::styled(status.as_str(), Style::default().fg(text_dim())));
    }

    let info = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_surface_box(f: &mut Frame, app: &App, now: Instant, area: Rect) {
    let border_color = if app.is_paused() { inactive() } else { accent() };
    let block = Block::default()
        .title(Span::styled(
            " shufflevis ",
            Style::default().fg(border_color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    match app.driver.surfaces().next() {
        Some(surface) => surface::draw_surface(f, surface, now, block, area),
        None => {
            // Nothing matched the selector: show an empty box
            let empty = Paragraph::new(Line::from(Span::styled(
                format!("No container matches {}", app.driver.config().selector),
                Style::default().fg(text_dim()),
            )))
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(empty, area);
        }
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let pause_label = if app.is_paused() { "Resume" } else { "Pause" };
    let hints = [("Space", pause_label), ("s", "Shuffle"), ("?", "Help"), ("q", "Quit")];

    let mut spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();
    spans.push(Span::styled(
        format!("cycles {}", app.driver.cycles()),
        Style::default().fg(text_dim()),
    ));

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let config = app.driver.config();
    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:>7}  ", key), Style::default().fg(accent())),
            Span::styled(desc, Style::default().fg(text())),
        ])
    };

    let lines = vec![
        key_line("Space", "Pause / resume the shuffle timer"),
        key_line("s", "Shuffle now"),
        key_line("?", "Toggle this help"),
        key_line("q/Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Every {}ms the data is shuffled; radii animate over {}ms.",
                config.cycle_interval_ms, config.transition_ms
            ),
            Style::default().fg(text_dim()),
        )),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Help ", Style::default().fg(accent())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent())),
    );
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
