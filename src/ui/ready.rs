//! Pre-start screen: test overview and the start prompt.

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(test) = app.session.test() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Length(12),
        Constraint::Percentage(30),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            test.title.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    if !test.description.is_empty() {
        content.push(Line::from(test.description.clone()));
        content.push(Line::from(""));
    }

    let mut facts = format!(
        "{} questions  |  {} minutes",
        test.questions.len(),
        test.time_limit
    );
    if let Some(difficulty) = &test.difficulty {
        facts.push_str("  |  ");
        facts.push_str(difficulty);
    }
    content.push(Line::from(Span::styled(
        facts,
        Style::default().fg(Color::White),
    )));
    content.push(Line::from(""));

    if let Some(error) = app.session.last_error() {
        content.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
        content.push(Line::from(""));
    }

    content.push(Line::from(Span::styled(
        "Press [Enter] to start  |  [Q] to quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, chunks[1]);
}
