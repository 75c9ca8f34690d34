//! Harness error taxonomy
//!
//! Distinguishes pre-flight and internal failures (run-fatal) from test-body
//! failures, which are contained per test and never surface here.

use std::path::PathBuf;

/// Errors that abort a harness run
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The target directory does not exist or is not a directory
    #[error("invalid target directory: {0}")]
    InvalidTarget(PathBuf),

    /// Worker process launched without a result channel path
    #[error("worker process launched without a result channel")]
    MissingChannel,

    /// Worker process asked to run a test the registry does not contain
    #[error("unknown test in worker process: {0}")]
    UnknownTest(String),

    /// Achieved score exceeds possible score; a harness bug, not a test failure
    #[error("harness invariant violated: score {score} exceeds full score {full_score}")]
    ScoreInvariant { score: u32, full_score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HarnessError::InvalidTarget(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "invalid target directory: /no/such/dir");

        let err = HarnessError::ScoreInvariant {
            score: 30,
            full_score: 20,
        };
        assert!(err.to_string().contains("score 30 exceeds full score 20"));
    }
}
