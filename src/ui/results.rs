//! Completed screen: score summary and per-question review.

use std::collections::HashMap;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::App;
use crate::models::{QuestionOutcome, TestResult};

const QUESTION_PREVIEW_LENGTH: usize = 45;

pub fn render(frame: &mut Frame, area: Rect, app: &App, result: &TestResult) {
    let chunks = Layout::vertical([
        Constraint::Length(7), // score summary
        Constraint::Min(8),    // review
        Constraint::Length(2), // controls
    ])
    .margin(1)
    .split(area);

    render_summary(frame, chunks[0], result);
    render_review(frame, chunks[1], app, result);
    render_controls(frame, chunks[2]);
}

fn render_summary(frame: &mut Frame, area: Rect, result: &TestResult) {
    let marks_color = if result.total_marks >= 0 {
        Color::Green
    } else {
        Color::Red
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} marks", result.total_marks),
            Style::default().fg(marks_color).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{} correct  |  {} wrong  |  {} unattempted  |  time {}",
                result.questions_correct,
                result.questions_wrong,
                result.questions_unattempted,
                super::format_clock(result.time_taken)
            ),
            Style::default().fg(Color::White),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(widget, area);
}

fn render_review(frame: &mut Frame, area: Rect, app: &App, result: &TestResult) {
    let Some(test) = app.session.test() else {
        return;
    };

    let outcomes: HashMap<&str, &QuestionOutcome> = result
        .details
        .iter()
        .map(|detail| (detail.question_id.as_str(), detail))
        .collect();

    let mut lines: Vec<Line> = Vec::new();
    for (index, question) in test.questions.iter().enumerate() {
        let outcome = outcomes.get(question.id.as_str());
        let (symbol, color) = match outcome {
            Some(o) if o.correct => ("+", Color::Green),
            Some(o) if o.selected_option.is_some() => ("-", Color::Red),
            _ => ("-", Color::DarkGray),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {symbol} "), Style::default().fg(color).bold()),
            Span::styled(format!("Q{:<3} ", index + 1), Style::default().fg(Color::White)),
            Span::styled(
                preview(&question.text),
                Style::default().fg(Color::Gray),
            ),
        ]));

        // A wrong answer with an explanation gets the explanation shown.
        let wrong = matches!(outcome, Some(o) if !o.correct && o.selected_option.is_some());
        if wrong {
            if let Some(explanation) = &question.explanation {
                if !explanation.text.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("       {}", preview(&explanation.text)),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }
    }

    let visible: Vec<Line> = lines.into_iter().skip(app.scroll).collect();

    let widget = Paragraph::new(visible).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Review ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(Line::from(Span::styled(
        "[Up/Down] scroll  [Q] quit",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn preview(text: &str) -> String {
    if text.chars().count() > QUESTION_PREVIEW_LENGTH {
        let cut: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
