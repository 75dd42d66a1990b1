//! In-progress screen: countdown, question, options, status palette.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::app::App;
use crate::models::Question;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // clock + progress
        Constraint::Length(7), // question text
        Constraint::Min(8),    // options
        Constraint::Length(3), // palette
        Constraint::Length(2), // controls / errors
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_question_text(frame, chunks[1], question);
    render_options(frame, chunks[2], app, question);
    render_palette(frame, chunks[3], app);
    render_footer(frame, chunks[4], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let halves =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let progress = format!(
        "Question {} of {}",
        app.session.current_index() + 1,
        app.session.question_count()
    );
    let progress_widget =
        Paragraph::new(progress).style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(progress_widget, halves[0]);

    let remaining = app.session.remaining_secs();
    let clock_color = if remaining < 60 {
        Color::Red
    } else if remaining < 300 {
        Color::Yellow
    } else {
        Color::Green
    };
    let clock_widget = Paragraph::new(super::format_clock(remaining))
        .alignment(Alignment::Right)
        .style(Style::default().fg(clock_color).bold());
    frame.render_widget(clock_widget, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let mut lines = vec![Line::from(question.text.clone())];
    if let Some(image) = &question.image {
        lines.push(Line::from(Span::styled(
            format!("[image: {image}]"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let recorded = app.session.answer_for(&question.id);

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_cursor = i == app.cursor;
            let is_recorded = recorded == Some(i);

            let prefix = if is_cursor { "> " } else { "  " };
            let marker = if is_recorded { "[x]" } else { "[ ]" };
            let label = option_label(i);

            let style = if is_cursor {
                Style::default().fg(Color::Yellow).bold()
            } else if is_recorded {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![Span::styled(
                format!("{prefix}{marker} {label}. {}", option.text),
                style,
            )];
            if let Some(image) = &option.image {
                spans.push(Span::styled(
                    format!("  [image: {image}]"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn option_label(index: usize) -> char {
    if index < 26 {
        (b'A' + index as u8) as char
    } else {
        '?'
    }
}

fn render_palette(frame: &mut Frame, area: Rect, app: &App) {
    let Some(test) = app.session.test() else {
        return;
    };

    let spans: Vec<Span> = test
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answered = app.session.answer_for(&question.id).is_some();
            let style = if i == app.session.current_index() {
                Style::default().fg(Color::Yellow).bold().underlined()
            } else if answered {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {:>2} ", i + 1), style)
        })
        .collect();

    let widget = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.session.is_submitting() {
        Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Yellow).bold(),
        ))
    } else if let Some(error) = app.session.last_error() {
        Line::from(Span::styled(
            format!("{error}  (press [S] to retry)"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            "[Up/Down] choose  [Enter] save answer  [Left/Right] move  [S] submit  [Q] quit",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let widget = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
