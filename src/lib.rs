//! # prep-console
//!
//! A terminal client for timed practice tests. One run drives one attempt of
//! one assigned test against a remote test service: eligibility check,
//! countdown, answer collection, submission, and the scored result.
//!
//! The test service owns all persistence and scoring; this crate owns the
//! session state machine and its terminal front end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use prep_console::app;
//! use prep_console::config::ServiceConfig;
//! use prep_console::service::HttpTestService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::new("https://api.example.com/v1", "bearer-token");
//!     let service = Arc::new(HttpTestService::new(config));
//!     app::run(service, "test-id".to_string()).await
//! }
//! ```

pub mod app;
pub mod config;
pub mod models;
pub mod service;
pub mod session;
pub mod terminal;
mod ui;
