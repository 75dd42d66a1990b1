//! Test service collaborator.
//!
//! The session controller only ever talks to the [`TestService`] trait; the
//! HTTP implementation lives in [`http`]. Tests swap in an in-memory fake.

mod http;

use async_trait::async_trait;

use crate::models::{Assignment, Submission, Test, TestResult};

pub use http::HttpTestService;

/// Errors surfaced by the test service.
///
/// Status-specific variants carry the server-provided message where the
/// protocol defines one; callers prefer that text over their own wording.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("session expired, sign in again")]
    Unauthorized,

    #[error("test not found")]
    NotFound,

    #[error("access denied: {0}")]
    Forbidden(String),

    /// The server already holds a started or completed attempt for this
    /// test. Authoritative; the client abandons its own view.
    #[error("{0}")]
    Conflict(String),

    #[error("service error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Remote operations the session controller depends on.
#[async_trait]
pub trait TestService: Send + Sync {
    /// Assignments of the signed-in student.
    async fn assignments(&self) -> Result<Vec<Assignment>, ServiceError>;

    /// Full test content by id.
    async fn test(&self, test_id: &str) -> Result<Test, ServiceError>;

    /// Mark the assignment `started`.
    async fn start_attempt(&self, test_id: &str) -> Result<(), ServiceError>;

    /// Send the collected answers; the service scores them.
    async fn submit_attempt(
        &self,
        test_id: &str,
        submission: &Submission,
    ) -> Result<TestResult, ServiceError>;
}
