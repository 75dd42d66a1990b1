use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Relates the signed-in student to a test.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub test_id: String,
    pub status: AssignmentStatus,
    /// Date-only schedule. When set, the test may only be started on that
    /// local calendar day.
    #[serde(default)]
    pub test_date: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Assigned,
    Started,
    Completed,
    Expired,
}
