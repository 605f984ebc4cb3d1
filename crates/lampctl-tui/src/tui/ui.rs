//! Layout and rendering for the dashboard.
//!
//! The layout is a single column: header, lamp panel, sliders, schedule,
//! arming, and a status bar that carries toasts and key hints.

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use lampctl_types::ArmedIndicator;

use super::app::{App, COLOR_PRESETS, Control};
use crate::format;

/// Draw the complete interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Length(7), // Lamp panel
            Constraint::Length(4), // Sliders
            Constraint::Length(4), // Schedule
            Constraint::Length(3), // Arming
            Constraint::Min(0),
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, main_layout[0], app);
    draw_lamp_panel(frame, main_layout[1], app);
    draw_sliders(frame, main_layout[2], app);
    draw_schedule(frame, main_layout[3], app);
    draw_arming(frame, main_layout[4], app);
    draw_status_bar(frame, main_layout[6], app);

    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Header with title, device clock, and connection indicator.
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " lampctl ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    if let Some(snapshot) = &app.snapshot {
        spans.push(Span::styled(
            format!(" device time {} ", snapshot.current_time),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if app.connection_lost {
        spans.push(Span::styled(
            " CONNECTION LOST ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Lamp state, brightness readout, motion sensors, and device status text.
fn draw_lamp_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Lamp ").borders(Borders::ALL);

    let Some(snapshot) = &app.snapshot else {
        let waiting = Paragraph::new("Waiting for device...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(waiting, area);
        return;
    };

    let lamp_style = if snapshot.lights_on {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Lamp: "),
            Span::styled(format::lamp_label(snapshot.lights_on), lamp_style),
            Span::raw(format!(
                "  at {}",
                format::brightness_percent(snapshot.brightness)
            )),
        ]),
        Line::from(vec![
            Span::raw("PIR1: "),
            pir_span(snapshot.pir1),
            Span::raw("  PIR2: "),
            pir_span(snapshot.pir2),
        ]),
        Line::from(vec![
            Span::raw("Color: "),
            Span::styled(
                "██",
                Style::default().fg(Color::Rgb(snapshot.r, snapshot.g, snapshot.b)),
            ),
            Span::raw(format!(" {}/{}/{}", snapshot.r, snapshot.g, snapshot.b)),
        ]),
        Line::from(Span::styled(
            snapshot.status.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if let Some(error) = snapshot.device_error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn pir_span(triggered: bool) -> Span<'static> {
    let style = if triggered {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format::pir_label(triggered), style)
}

/// Brightness ceiling and inactivity shutoff sliders.
fn draw_sliders(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Settings ").borders(Borders::ALL);

    let lines = vec![
        slider_line(
            "Brightness ceiling",
            format!("{:>3}", app.brightness_setting),
            app.focus == Some(Control::Brightness),
        ),
        slider_line(
            "Shutoff timeout   ",
            format::timeout_label(app.timeout_setting),
            app.focus == Some(Control::Timeout),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn slider_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(
        format!("{}{}  {}", marker, label, value),
        style,
    ))
}

/// Schedule checkbox, time window, and state indicator.
fn draw_schedule(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Schedule ").borders(Borders::ALL);

    let Some(snapshot) = &app.snapshot else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let checkbox = if snapshot.schedule_enabled {
        "[x]"
    } else {
        "[ ]"
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} enabled   ", checkbox)),
            time_field(
                &app.schedule_start_input,
                app.focus == Some(Control::ScheduleStart),
            ),
            Span::raw(" - "),
            time_field(
                &app.schedule_end_input,
                app.focus == Some(Control::ScheduleEnd),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "state: {}",
                format::schedule_label(snapshot.schedule_indicator())
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn time_field(value: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Span::styled(format!(" {} ", value), style)
}

/// Arming override state and the relevant key hints.
fn draw_arming(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Override ").borders(Borders::ALL);

    let Some(snapshot) = &app.snapshot else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let indicator = snapshot.armed_indicator();
    let line = match indicator {
        ArmedIndicator::Active { .. } => Line::from(vec![
            Span::styled(
                format::armed_label(indicator),
                Style::default().fg(Color::Green),
            ),
            Span::styled("   x: disarm", Style::default().fg(Color::DarkGray)),
        ]),
        ArmedIndicator::Inactive => Line::from(vec![
            Span::styled(
                format::armed_label(indicator),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                "   1/4/8: arm hours  d: until end of day",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Status bar with the toast, or key hints when nothing is pending.
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let time_str = Local::now().format("%H:%M:%S").to_string();

    let left = if let Some(toast) = &app.toast {
        let style = if toast.is_error {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        Line::from(Span::styled(format!(" {}", toast.message), style))
    } else if app.connection_lost {
        Line::from(Span::styled(
            " Connection lost",
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            " Tab: focus  ←/→/↓/↑: adjust  Enter: save schedule  e: schedule  c: color  ?: help  q: quit",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    frame.render_widget(Paragraph::new(left), layout[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            time_str,
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right),
        layout[1],
    );
}

/// Centered help overlay listing all key bindings.
fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(50, 16, frame.area());

    let text = vec![
        Line::from("q          quit"),
        Line::from("Tab        focus next control"),
        Line::from("Shift+Tab  focus previous control"),
        Line::from("←/→ ↓/↑    adjust focused slider (-/+ also work)"),
        Line::from("Enter      save edited schedule"),
        Line::from("Esc        release focus, discard edit"),
        Line::from("e          toggle schedule"),
        Line::from("1/4/8      arm override for N hours"),
        Line::from("d          arm until end of day"),
        Line::from("x          disarm"),
        Line::from(format!("c          cycle color ({} presets)", COLOR_PRESETS.len())),
        Line::from("?          toggle this help"),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// A fixed-size rect centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc;

    use super::super::messages::DeviceEvent;

    fn make_app_with_snapshot() -> App {
        let (tx, _rx) = mpsc::channel(8);
        let (_etx, erx) = mpsc::channel(8);
        let mut app = App::new(tx, erx);
        let snapshot = serde_json::from_str(
            r#"{
                "lightsOn": true,
                "brightness": 128,
                "maxBrightness": 200,
                "timeout": 30,
                "pir1": 1,
                "pir2": 0,
                "status": "Lights on",
                "scheduleEnabled": true,
                "scheduleStartHour": 19,
                "scheduleStartMinute": 30,
                "scheduleEndHour": 6,
                "scheduleEndMinute": 0,
                "withinSchedule": true,
                "isArmed": false,
                "armedRemaining": 0,
                "currentTime": "21:15",
                "r": 255,
                "g": 140,
                "b": 60
            }"#,
        )
        .expect("decode snapshot");
        app.handle_device_event(DeviceEvent::Snapshot { seq: 1, snapshot });
        app
    }

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("create test terminal");
        terminal
            .draw(|frame| draw(frame, app))
            .expect("draw dashboard");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_lamp_panel_shows_device_color() {
        let app = make_app_with_snapshot();
        let text = render_to_text(&app);
        assert!(text.contains("Color:"));
        assert!(text.contains("255/140/60"));
    }

    #[test]
    fn test_dashboard_shows_lamp_state_and_time() {
        let app = make_app_with_snapshot();
        let text = render_to_text(&app);
        assert!(text.contains("ON"));
        assert!(text.contains("21:15"));
    }
}
