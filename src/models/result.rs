use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded answer in the submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: String,
    pub selected_option: usize,
}

/// The full submission sent when an attempt ends. Entries follow the test's
/// question order; unattempted questions are absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub answers: Vec<AnswerEntry>,
    /// Whole seconds from start to submit; 0 when the start instant is
    /// unknown (resumed attempt).
    pub time_taken: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

/// Scored outcome returned by the service. Read-only display data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub total_marks: i64,
    pub questions_correct: u32,
    pub questions_wrong: u32,
    pub questions_unattempted: u32,
    pub time_taken: u64,
    #[serde(default)]
    pub details: Vec<QuestionOutcome>,
}

/// Per-question correctness for the review screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question_id: String,
    #[serde(default)]
    pub selected_option: Option<usize>,
    pub correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_serialization() {
        let submission = Submission {
            answers: vec![
                AnswerEntry {
                    question_id: "q1".to_string(),
                    selected_option: 2,
                },
                AnswerEntry {
                    question_id: "q3".to_string(),
                    selected_option: 0,
                },
            ],
            time_taken: 95,
            started_at: None,
        };

        let json = serde_json::to_string(&submission).unwrap();
        assert!(json.contains("\"questionId\":\"q1\""));
        assert!(json.contains("\"selectedOption\":2"));
        assert!(json.contains("\"timeTaken\":95"));
        // Unknown start instant is omitted, not null.
        assert!(!json.contains("startedAt"));
    }

    #[test]
    fn test_result_details_default_empty() {
        let json = r#"{
            "totalMarks": 12,
            "questionsCorrect": 4,
            "questionsWrong": 1,
            "questionsUnattempted": 0,
            "timeTaken": 300
        }"#;

        let result: TestResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_marks, 12);
        assert!(result.details.is_empty());
    }
}
