//! Per-test outcome types
//!
//! A `TestOutcome` is produced by the isolated executor, crosses the process
//! boundary exactly once as JSON, and is then owned by the runner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution status of a single test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    /// The test body panicked; the detail carries the captured trace
    Exception,
    /// The test overran its wall-clock budget and was killed
    Timeout,
}

impl TestStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Exception => write!(f, "EXCEPTION"),
            TestStatus::Timeout => write!(f, "TIMEOUT"),
        }
    }
}

/// Result of a single test execution
///
/// `points_awarded` is always within `[0, points]` for the definition that
/// produced it: full points on pass, zero otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestOutcome {
    pub points_awarded: u32,
    pub status: TestStatus,
    pub detail: String,
}

impl TestOutcome {
    /// Full points; detail is the canonical `PASS (p/p)` string
    pub fn pass(points: u32) -> Self {
        Self {
            points_awarded: points,
            status: TestStatus::Pass,
            detail: format!("PASS ({points}/{points})"),
        }
    }

    /// Zero points; detail is the failure value reported by the test
    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            points_awarded: 0,
            status: TestStatus::Fail,
            detail: detail.into(),
        }
    }

    /// Zero points; detail is the formatted panic message and backtrace
    pub fn exception(detail: impl Into<String>) -> Self {
        Self {
            points_awarded: 0,
            status: TestStatus::Exception,
            detail: detail.into(),
        }
    }

    /// Zero points; the literal detail "Timeout" is part of the report format
    pub fn timeout() -> Self {
        Self {
            points_awarded: 0,
            status: TestStatus::Timeout,
            detail: "Timeout".to_string(),
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} pts] {}", self.status, self.points_awarded, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_outcome() {
        let outcome = TestOutcome::pass(10);
        assert_eq!(outcome.points_awarded, 10);
        assert!(outcome.status.is_success());
        assert_eq!(outcome.detail, "PASS (10/10)");
    }

    #[test]
    fn test_fail_and_timeout_award_nothing() {
        assert_eq!(TestOutcome::fail("missing file").points_awarded, 0);
        let timeout = TestOutcome::timeout();
        assert_eq!(timeout.points_awarded, 0);
        assert_eq!(timeout.detail, "Timeout");
    }

    #[test]
    fn test_outcome_wire_format() {
        let outcome = TestOutcome::exception("panicked at demo");
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"exception\""));

        let back: TestOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, TestStatus::Exception);
        assert_eq!(back.detail, "panicked at demo");
    }
}
