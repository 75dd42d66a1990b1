//! The test session state machine.
//!
//! One `TestSession` drives one attempt of one test: eligibility, countdown,
//! answer collection, submission. It owns no terminal and renders nothing;
//! the UI layer reads its state and calls its operations.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

use crate::models::{AnswerEntry, Question, Submission, Test, TestResult};
use crate::service::{ServiceError, TestService};

use super::eligibility::{self, BlockReason, Eligibility};

/// Where the session currently is.
#[derive(Debug, Clone)]
pub enum Phase {
    /// Fetching assignments and test content.
    Loading,
    /// Not eligible. Terminal; only escape is quitting.
    Blocked(BlockReason),
    /// Eligible and loaded, waiting for an explicit start.
    Ready,
    /// Countdown running, answers being collected.
    InProgress,
    /// Result received. Terminal.
    Completed(TestResult),
}

/// One attempt of one test.
pub struct TestSession {
    service: Arc<dyn TestService>,
    test_id: String,
    phase: Phase,
    test: Option<Test>,
    current: usize,
    answers: HashMap<String, usize>,
    remaining_secs: u64,
    running: bool,
    submitting: bool,
    started_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl TestSession {
    pub fn new(service: Arc<dyn TestService>, test_id: impl Into<String>) -> Self {
        Self {
            service,
            test_id: test_id.into(),
            phase: Phase::Loading,
            test: None,
            current: 0,
            answers: HashMap::new(),
            remaining_secs: 0,
            running: false,
            submitting: false,
            started_at: None,
            last_error: None,
        }
    }

    /// Check eligibility and fetch content. `Loading` ends in `Blocked`,
    /// `Ready`, or (for an assignment already `started`) directly in
    /// `InProgress` with the full time limit as a conservative countdown.
    pub async fn load(&mut self) {
        let assignments = match self.service.assignments().await {
            Ok(assignments) => assignments,
            Err(err) => {
                self.block(err.into());
                return;
            }
        };

        let decision = eligibility::evaluate(&assignments, &self.test_id, Local::now());
        let resume = match decision {
            Eligibility::Blocked(reason) => {
                // Blocked before the content fetch; nothing is downloaded.
                self.block(reason);
                return;
            }
            Eligibility::Resume => true,
            Eligibility::Start => false,
        };

        match self.service.test(&self.test_id).await {
            Ok(test) => {
                self.remaining_secs = test.time_limit_secs();
                log::info!(
                    "loaded test {} ({} questions, {} min)",
                    test.id,
                    test.questions.len(),
                    test.time_limit
                );
                self.test = Some(test);
                if resume {
                    // The original start instant is not recoverable, so the
                    // clock restarts at the full limit and no start time is
                    // reported on submit.
                    self.running = true;
                    self.phase = Phase::InProgress;
                } else {
                    self.phase = Phase::Ready;
                }
            }
            Err(err) => self.block(err.into()),
        }
    }

    /// Ask the service to mark the attempt started, then begin the countdown.
    /// A conflict means the server already holds an attempt; its view wins
    /// and the session aborts. Any other failure leaves us in `Ready`.
    pub async fn start(&mut self) {
        if !matches!(self.phase, Phase::Ready) {
            return;
        }
        self.last_error = None;

        match self.service.start_attempt(&self.test_id).await {
            Ok(()) => {
                self.started_at = Some(Utc::now());
                self.running = true;
                self.phase = Phase::InProgress;
                log::info!("attempt started, {} seconds on the clock", self.remaining_secs);
            }
            Err(ServiceError::Conflict(message)) => {
                log::warn!("start rejected: {message}");
                self.block(BlockReason::StartRejected(message));
            }
            Err(err) => {
                log::warn!("start failed: {err}");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// One countdown second elapsed. Returns `true` exactly once, on the
    /// tick that exhausts the clock; the caller then submits.
    pub fn tick(&mut self) -> bool {
        if !self.running || !matches!(self.phase, Phase::InProgress) {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            log::info!("time limit reached");
            return true;
        }
        false
    }

    /// Record (or overwrite) the answer for a question. Ignores unknown
    /// questions and out-of-range option indexes.
    pub fn select_answer(&mut self, question_id: &str, option: usize) {
        if !matches!(self.phase, Phase::InProgress) {
            return;
        }
        let Some(test) = &self.test else { return };
        let valid = test
            .questions
            .iter()
            .any(|q| q.id == question_id && option < q.options.len());
        if valid {
            self.answers.insert(question_id.to_string(), option);
        }
    }

    /// Step to the next question; no-op on the last one.
    pub fn next(&mut self) {
        if !matches!(self.phase, Phase::InProgress) {
            return;
        }
        if self.current + 1 < self.question_count() {
            self.current += 1;
        }
    }

    /// Step to the previous question; no-op on the first one.
    pub fn previous(&mut self) {
        if !matches!(self.phase, Phase::InProgress) {
            return;
        }
        self.current = self.current.saturating_sub(1);
    }

    /// Jump straight to a question; out-of-range indexes are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if !matches!(self.phase, Phase::InProgress) {
            return;
        }
        if index < self.question_count() {
            self.current = index;
        }
    }

    /// Send the attempt in. Guarded so the countdown and a manual request in
    /// the same tick window produce one request; on failure the session
    /// stays `InProgress` with the clock stopped and submission can be
    /// retried.
    pub async fn submit(&mut self) {
        if self.submitting || !matches!(self.phase, Phase::InProgress) {
            return;
        }
        self.submitting = true;
        self.running = false;
        self.last_error = None;

        let submission = self.build_submission();
        log::info!(
            "submitting {} answers for test {}",
            submission.answers.len(),
            self.test_id
        );
        match self.service.submit_attempt(&self.test_id, &submission).await {
            Ok(result) => {
                log::info!("attempt scored: {} marks", result.total_marks);
                self.phase = Phase::Completed(result);
            }
            Err(err) => {
                log::warn!("submission failed: {err}");
                self.last_error = Some(err.to_string());
            }
        }
        self.submitting = false;
    }

    /// Answers in test question order, unattempted questions absent.
    fn build_submission(&self) -> Submission {
        let answers = self
            .test
            .iter()
            .flat_map(|t| &t.questions)
            .filter_map(|question| {
                self.answers.get(&question.id).map(|&option| AnswerEntry {
                    question_id: question.id.clone(),
                    selected_option: option,
                })
            })
            .collect();

        let time_taken = self
            .started_at
            .map(|started| (Utc::now() - started).num_seconds().max(0) as u64)
            .unwrap_or(0);

        Submission {
            answers,
            time_taken,
            started_at: self.started_at,
        }
    }

    fn block(&mut self, reason: BlockReason) {
        log::info!("session blocked: {reason}");
        self.running = false;
        self.phase = Phase::Blocked(reason);
    }

    // --- read side, for the UI ---

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn test(&self) -> Option<&Test> {
        self.test.as_ref()
    }

    pub fn question_count(&self) -> usize {
        self.test.as_ref().map_or(0, |t| t.questions.len())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.test.as_ref()?.questions.get(self.current)
    }

    pub fn answer_for(&self, question_id: &str) -> Option<usize> {
        self.answers.get(question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
