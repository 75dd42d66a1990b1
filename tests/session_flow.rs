//! End-to-end session scenarios against an in-memory test service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Days, Local};

use prep_console::models::{
    Assignment, AssignmentStatus, OptionEntry, Question, QuestionOutcome, Submission, Test,
    TestResult,
};
use prep_console::service::{ServiceError, TestService};
use prep_console::session::{BlockReason, Phase, TestSession};

/// In-memory stand-in for the remote service. Scores the same way the real
/// one does: option-index equality per question.
struct InMemoryService {
    assignments: Vec<Assignment>,
    test: Option<Test>,
    started: Mutex<bool>,
    failing_submits: Mutex<u32>,
    submissions: Mutex<Vec<Submission>>,
}

impl InMemoryService {
    fn new(status: AssignmentStatus, test: Test) -> Arc<Self> {
        Arc::new(Self {
            assignments: vec![Assignment {
                test_id: test.id.clone(),
                status,
                test_date: None,
                assigned_at: None,
            }],
            test: Some(test),
            started: Mutex::new(false),
            failing_submits: Mutex::new(0),
            submissions: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TestService for InMemoryService {
    async fn assignments(&self) -> Result<Vec<Assignment>, ServiceError> {
        Ok(self.assignments.clone())
    }

    async fn test(&self, _test_id: &str) -> Result<Test, ServiceError> {
        Ok(self
            .test
            .clone()
            .expect("content must not be fetched for a blocked assignment"))
    }

    async fn start_attempt(&self, _test_id: &str) -> Result<(), ServiceError> {
        *self.started.lock().unwrap() = true;
        Ok(())
    }

    async fn submit_attempt(
        &self,
        _test_id: &str,
        submission: &Submission,
    ) -> Result<TestResult, ServiceError> {
        let mut failing = self.failing_submits.lock().unwrap();
        if *failing > 0 {
            *failing -= 1;
            return Err(ServiceError::Status {
                status: 502,
                message: "submission could not be saved".to_string(),
            });
        }
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(score(self.test.as_ref().unwrap(), submission))
    }
}

fn score(test: &Test, submission: &Submission) -> TestResult {
    let answers: HashMap<&str, usize> = submission
        .answers
        .iter()
        .map(|a| (a.question_id.as_str(), a.selected_option))
        .collect();

    let mut correct = 0u32;
    let mut wrong = 0u32;
    for question in &test.questions {
        match answers.get(question.id.as_str()) {
            Some(&selected) if selected == question.correct_option => correct += 1,
            Some(_) => wrong += 1,
            None => {}
        }
    }

    TestResult {
        // NEET-style marking: +4 per correct, -1 per wrong.
        total_marks: 4 * i64::from(correct) - i64::from(wrong),
        questions_correct: correct,
        questions_wrong: wrong,
        questions_unattempted: test.questions.len() as u32 - correct - wrong,
        time_taken: submission.time_taken,
        details: test
            .questions
            .iter()
            .map(|question| {
                let selected = answers.get(question.id.as_str()).copied();
                QuestionOutcome {
                    question_id: question.id.clone(),
                    selected_option: selected,
                    correct: selected == Some(question.correct_option),
                }
            })
            .collect(),
    }
}

fn sample_test(num_questions: usize, time_limit: u64) -> Test {
    let questions = (1..=num_questions)
        .map(|n| Question {
            id: format!("q{n}"),
            text: format!("Question {n}"),
            image: None,
            options: (0..4)
                .map(|o| OptionEntry {
                    text: format!("Option {o}"),
                    image: None,
                })
                .collect(),
            // Option 1 is always the keyed answer in these fixtures.
            correct_option: 1,
            explanation: None,
        })
        .collect();

    Test {
        id: "t1".to_string(),
        title: "Mock Test".to_string(),
        description: String::new(),
        time_limit,
        difficulty: Some("Medium".to_string()),
        questions,
    }
}

/// One-minute test, no schedule: start, let the clock run out, and the
/// automatic submission goes up with an empty answer list.
#[tokio::test]
async fn timed_out_attempt_submits_empty_answers() {
    let service = InMemoryService::new(AssignmentStatus::Assigned, sample_test(3, 1));
    let mut session = TestSession::new(service.clone(), "t1");

    session.load().await;
    assert!(matches!(session.phase(), Phase::Ready));

    session.start().await;
    assert!(matches!(session.phase(), Phase::InProgress));
    assert!(*service.started.lock().unwrap());
    assert_eq!(session.remaining_secs(), 60);

    let mut expiries = 0;
    for _ in 0..60 {
        if session.tick() {
            expiries += 1;
        }
    }
    assert_eq!(expiries, 1);

    session.submit().await;
    let Phase::Completed(result) = session.phase() else {
        panic!("expected Completed, got {:?}", session.phase());
    };
    assert_eq!(result.questions_unattempted, 3);

    let submissions = service.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert!(submissions[0].answers.is_empty());
}

#[tokio::test]
async fn completed_assignment_never_reaches_ready() {
    let service = InMemoryService::new(AssignmentStatus::Completed, sample_test(3, 1));
    let mut session = TestSession::new(service, "t1");

    session.load().await;
    assert!(matches!(
        session.phase(),
        Phase::Blocked(BlockReason::AlreadyCompleted)
    ));
}

/// A schedule set for tomorrow blocks today, and the block is decided from
/// the assignment list alone: the fake holds no content and would panic on
/// a fetch.
#[tokio::test]
async fn scheduled_for_tomorrow_blocks_without_content_fetch() {
    let tomorrow = Local::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap();
    let service = Arc::new(InMemoryService {
        assignments: vec![Assignment {
            test_id: "t1".to_string(),
            status: AssignmentStatus::Assigned,
            test_date: Some(tomorrow),
            assigned_at: None,
        }],
        test: None,
        started: Mutex::new(false),
        failing_submits: Mutex::new(0),
        submissions: Mutex::new(Vec::new()),
    });
    let mut session = TestSession::new(service, "t1");

    session.load().await;
    match session.phase() {
        Phase::Blocked(BlockReason::NotYetOpen(date)) => assert_eq!(*date, tomorrow),
        other => panic!("expected NotYetOpen, got {other:?}"),
    }
}

/// Answer two of three questions and submit by hand from the last one.
#[tokio::test]
async fn partial_attempt_counts_attempted_and_unattempted() {
    let service = InMemoryService::new(AssignmentStatus::Assigned, sample_test(3, 5));
    let mut session = TestSession::new(service.clone(), "t1");

    session.load().await;
    session.start().await;

    session.select_answer("q1", 1); // correct
    session.next();
    session.next();
    session.select_answer("q3", 2); // wrong
    assert_eq!(session.current_index(), 2);

    session.submit().await;
    let Phase::Completed(result) = session.phase() else {
        panic!("expected Completed, got {:?}", session.phase());
    };
    assert_eq!(result.questions_correct, 1);
    assert_eq!(result.questions_wrong, 1);
    assert_eq!(result.questions_unattempted, 1);
    assert_eq!(result.total_marks, 3);

    let submissions = service.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].answers.len(), 2);
}

/// The clock runs out, the automatic submission fails, and a manual retry
/// with the same answers lands.
#[tokio::test]
async fn failed_timeout_submission_can_be_retried() {
    let service = InMemoryService::new(AssignmentStatus::Assigned, sample_test(2, 1));
    let mut session = TestSession::new(service.clone(), "t1");

    session.load().await;
    session.start().await;
    session.select_answer("q2", 1);

    while !session.tick() {}
    *service.failing_submits.lock().unwrap() = 1;

    session.submit().await;
    assert!(matches!(session.phase(), Phase::InProgress));
    assert!(session.last_error().is_some());
    assert!(!session.is_running());
    assert!(service.submissions.lock().unwrap().is_empty());

    session.submit().await;
    assert!(matches!(session.phase(), Phase::Completed(_)));

    let submissions = service.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].answers.len(), 1);
}
