//! Aggregated score report
//!
//! Exactly three top-level fields are persisted: `score`, `full_score`, and
//! the per-test detail map. `score <= full_score` must hold before the
//! report may be persisted; a violation is a harness bug, not a test
//! failure, and aborts the run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::HarnessError;
use crate::models::TestOutcome;

/// Final aggregated result of a run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Report {
    /// Sum of points awarded across all tests
    pub score: u32,

    /// Sum of all registered point values
    pub full_score: u32,

    /// Per-test result detail, keyed by test name
    pub tests: BTreeMap<String, String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one test's outcome, accumulating both score tallies
    pub fn record(&mut self, name: &str, possible: u32, outcome: &TestOutcome) {
        self.full_score += possible;
        self.score += outcome.points_awarded;
        self.tests.insert(name.to_string(), outcome.detail.clone());
    }

    /// Check the harness invariant before persistence
    pub fn verify(&self) -> Result<(), HarnessError> {
        if self.score > self.full_score {
            return Err(HarnessError::ScoreInvariant {
                score: self.score,
                full_score: self.full_score,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates_both_tallies() {
        let mut report = Report::new();
        report.record("a", 10, &TestOutcome::pass(10));
        report.record("b", 5, &TestOutcome::timeout());
        report.record("c", 5, &TestOutcome::fail("bad"));

        assert_eq!(report.score, 10);
        assert_eq!(report.full_score, 20);
        assert_eq!(report.tests["a"], "PASS (10/10)");
        assert_eq!(report.tests["b"], "Timeout");
        assert_eq!(report.tests["c"], "bad");
    }

    #[test]
    fn test_verify_accepts_valid_report() {
        let mut report = Report::new();
        report.record("a", 10, &TestOutcome::pass(10));
        assert!(report.verify().is_ok());
    }

    #[test]
    fn test_verify_rejects_inflated_score() {
        let report = Report {
            score: 30,
            full_score: 20,
            tests: BTreeMap::new(),
        };
        let err = report.verify().unwrap_err();
        assert!(matches!(err, HarnessError::ScoreInvariant { .. }));
    }

    #[test]
    fn test_report_serializes_three_fields() {
        let mut report = Report::new();
        report.record("a", 10, &TestOutcome::pass(10));

        let value = serde_json::to_value(&report).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(value["score"], 10);
        assert_eq!(value["full_score"], 10);
        assert_eq!(value["tests"]["a"], "PASS (10/10)");

        let back: Report = serde_json::from_value(value).unwrap();
        assert_eq!(back.score, 10);
    }
}
