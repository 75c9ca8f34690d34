//! Data models for the grading harness
//!
//! Contains the per-test outcome types exchanged between worker and runner.

mod outcome;

pub use outcome::{TestOutcome, TestStatus};
