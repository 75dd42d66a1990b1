//! Render-only screens, one per session phase.
//!
//! Nothing in here makes state decisions; every screen reads the session
//! through the [`App`] it is handed.

mod question;
mod ready;
mod results;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::session::Phase;

const TITLE: &str = "PREP CONSOLE";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.session.phase() {
        Phase::Loading => render_banner(
            frame,
            area,
            "Fetching your assignment...",
            Color::Yellow,
            None,
        ),
        Phase::Blocked(reason) => render_banner(
            frame,
            area,
            &reason.to_string(),
            Color::Red,
            Some("Press [Q] to exit"),
        ),
        Phase::Ready => ready::render(frame, area, app),
        Phase::InProgress => question::render(frame, area, app),
        Phase::Completed(result) => results::render(frame, area, app, result),
    }
}

/// Centered title-and-message screen for the phases with nothing else on them.
fn render_banner(frame: &mut Frame, area: Rect, message: &str, color: Color, hint: Option<&str>) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(9),
        Constraint::Percentage(40),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
    ];
    if let Some(hint) = hint {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

/// `mm:ss`, with an hour part only when the clock needs one.
fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_clock;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(3600), "1:00:00");
        assert_eq!(format_clock(10_800), "3:00:00");
    }
}
