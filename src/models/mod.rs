//! Domain types exchanged with the test service.
//!
//! Everything here mirrors the service's JSON wire format. Incoming shapes
//! are normalized at deserialization so the rest of the crate only ever sees
//! one form of each entity.

mod assignment;
mod result;

pub use assignment::{Assignment, AssignmentStatus};
pub use result::{AnswerEntry, QuestionOutcome, Submission, TestResult};
pub use test::{Explanation, OptionEntry, Question, Test};
