//! Driver loop: wires terminal events, countdown ticks, and the session.
//!
//! The loop owns the ticker handle and drops it on submission or teardown,
//! so no tick can reach the session after either. Service calls are awaited
//! in the loop itself; the `submitting` guard in the session keeps a timer
//! expiry and a manual submit in the same tick window down to one request.

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::service::TestService;
use crate::session::{Phase, TestSession, Ticker};
use crate::terminal;
use crate::ui;

/// Session state plus the two bits of presentation state the controller
/// does not own: the option cursor and the review scroll offset.
pub struct App {
    pub session: TestSession,
    pub cursor: usize,
    pub scroll: usize,
}

enum Action {
    None,
    Quit,
    CountdownStarted,
    SubmitRequested,
}

/// Run one attempt of one test in the terminal.
pub async fn run(service: Arc<dyn TestService>, test_id: String) -> Result<()> {
    let mut app = App {
        session: TestSession::new(service, test_id),
        cursor: 0,
        scroll: 0,
    };

    let mut term = terminal::init()?;
    let result = drive(&mut term, &mut app).await;
    terminal::restore()?;
    result
}

async fn drive(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<()> {
    // Show the loading screen before the fetches block the loop.
    terminal.draw(|frame| ui::render(frame, app))?;
    app.session.load().await;

    // A resumed attempt is already in progress when load returns.
    let mut ticker = None;
    let mut ticks = None;
    if app.session.is_running() {
        let (handle, rx) = Ticker::start();
        ticker = Some(handle);
        ticks = Some(rx);
    }

    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            () = next_tick(&mut ticks) => {
                if app.session.tick() {
                    // Cancel before submitting so nothing fires mid-call.
                    ticker = None;
                    ticks = None;
                    app.session.submit().await;
                }
            }
            maybe_event = events.next() => {
                let Some(event) = maybe_event else { break };
                if let Event::Key(key) = event? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match handle_key(app, key.code).await {
                        Action::Quit => break,
                        Action::CountdownStarted => {
                            let (handle, rx) = Ticker::start();
                            ticker = Some(handle);
                            ticks = Some(rx);
                        }
                        Action::SubmitRequested => {
                            ticker = None;
                            ticks = None;
                            app.session.submit().await;
                        }
                        Action::None => {}
                    }
                }
            }
        }
    }

    drop(ticker);
    Ok(())
}

/// Resolve to the next tick, or never when no ticker is live.
async fn next_tick(ticks: &mut Option<mpsc::UnboundedReceiver<()>>) {
    match ticks {
        Some(rx) => {
            if rx.recv().await.is_none() {
                std::future::pending().await
            }
        }
        None => std::future::pending().await,
    }
}

async fn handle_key(app: &mut App, key: KeyCode) -> Action {
    match app.session.phase() {
        Phase::Loading => match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        },

        Phase::Blocked(_) => match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => Action::Quit,
            _ => Action::None,
        },

        Phase::Ready => match key {
            KeyCode::Enter => {
                app.session.start().await;
                if app.session.is_running() {
                    Action::CountdownStarted
                } else {
                    Action::None
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        },

        Phase::InProgress => handle_question_key(app, key),

        Phase::Completed(_) => match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let max = app.session.question_count().saturating_sub(1);
                app.scroll = (app.scroll + 1).min(max);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.scroll = app.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => Action::Quit,
            _ => Action::None,
        },
    }
}

fn handle_question_key(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let options = option_count(app);
            if options > 0 && app.cursor + 1 < options {
                app.cursor += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(id) = app.session.current_question().map(|q| q.id.clone()) {
                app.session.select_answer(&id, app.cursor);
            }
        }
        KeyCode::Right | KeyCode::Char('n') => {
            app.session.next();
            sync_cursor(app);
        }
        KeyCode::Left | KeyCode::Char('p') => {
            app.session.previous();
            sync_cursor(app);
        }
        KeyCode::PageUp => {
            app.session.jump_to(0);
            sync_cursor(app);
        }
        KeyCode::PageDown => {
            let last = app.session.question_count().saturating_sub(1);
            app.session.jump_to(last);
            sync_cursor(app);
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            if !app.session.is_submitting() {
                return Action::SubmitRequested;
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            // Abandoning mid-attempt; nothing is persisted locally.
            return Action::Quit;
        }
        _ => {}
    }
    Action::None
}

/// Put the cursor on the recorded answer of the freshly current question.
fn sync_cursor(app: &mut App) {
    app.cursor = app
        .session
        .current_question()
        .and_then(|q| app.session.answer_for(&q.id))
        .unwrap_or(0);
}

fn option_count(app: &App) -> usize {
    app.session.current_question().map_or(0, |q| q.options.len())
}
