//! Test session core.
//!
//! One attempt of one test, from eligibility check through result display:
//! the state machine ([`controller`]), the assignment gate ([`eligibility`]),
//! and the countdown ticker ([`countdown`]).

mod controller;
mod countdown;
mod eligibility;

pub use controller::{Phase, TestSession};
pub use countdown::Ticker;
pub use eligibility::{evaluate, BlockReason, Eligibility};
