//! Assignment gate: decides whether an attempt may begin.
//!
//! Pure over its inputs so every branch is testable without a service. The
//! scheduled-date window is the whole local calendar day, 00:00:00 through
//! 23:59:59.999 inclusive, which is exactly "now falls on that local date".

use chrono::{DateTime, Local, NaiveDate};

use crate::models::{Assignment, AssignmentStatus};
use crate::service::ServiceError;

/// Outcome of the eligibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Assigned and inside (or without) the scheduled window.
    Start,
    /// Already `started` server-side; re-enter the attempt directly.
    Resume,
    /// No attempt may begin. Terminal for this run.
    Blocked(BlockReason),
}

/// Why an attempt cannot begin. Display text is shown to the student as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockReason {
    #[error("you are not assigned to this test")]
    NotAssigned,

    #[error("you have already completed this test")]
    AlreadyCompleted,

    #[error("this assignment has expired")]
    AssignmentExpired,

    #[error("this test is scheduled for {0}")]
    NotYetOpen(NaiveDate),

    #[error("the window for this test closed on {0}")]
    WindowClosed(NaiveDate),

    #[error("your session has expired, sign in again")]
    SessionExpired,

    #[error("test not found")]
    TestNotFound,

    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The server rejected the start call because an attempt already exists.
    /// Its view wins over ours.
    #[error("{0}")]
    StartRejected(String),

    #[error("could not reach the test service: {0}")]
    ServiceUnavailable(String),
}

/// Locate the assignment for `test_id` and branch on its status.
pub fn evaluate(assignments: &[Assignment], test_id: &str, now: DateTime<Local>) -> Eligibility {
    let Some(assignment) = assignments.iter().find(|a| a.test_id == test_id) else {
        return Eligibility::Blocked(BlockReason::NotAssigned);
    };

    match assignment.status {
        AssignmentStatus::Completed => Eligibility::Blocked(BlockReason::AlreadyCompleted),
        AssignmentStatus::Expired => Eligibility::Blocked(BlockReason::AssignmentExpired),
        AssignmentStatus::Started => Eligibility::Resume,
        AssignmentStatus::Assigned => match assignment.test_date {
            None => Eligibility::Start,
            Some(date) => {
                let today = now.date_naive();
                if today < date {
                    Eligibility::Blocked(BlockReason::NotYetOpen(date))
                } else if today > date {
                    Eligibility::Blocked(BlockReason::WindowClosed(date))
                } else {
                    Eligibility::Start
                }
            }
        },
    }
}

/// Fold a service failure during load into a terminal block.
impl From<ServiceError> for BlockReason {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => BlockReason::SessionExpired,
            ServiceError::NotFound => BlockReason::TestNotFound,
            ServiceError::Forbidden(message) => BlockReason::AccessDenied(message),
            ServiceError::Conflict(message) => BlockReason::StartRejected(message),
            other => BlockReason::ServiceUnavailable(other.to_string()),
        }
    }
}
