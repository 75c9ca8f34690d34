//! Report persistence
//!
//! Writes the finalized report as JSON to a fixed filename inside the
//! original (non-scratch) target directory, replacing any previous report so
//! re-runs always produce a fresh file.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::Report;

/// Report filename inside the target directory
pub const REPORT_FILE: &str = "test.json";

/// Persist the report, overwriting any existing one
pub fn save_report(report: &Report, target: &Path) -> Result<PathBuf> {
    let path = target.join(REPORT_FILE);
    let file = File::create(&path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, report).context("failed to write report")?;
    writer.flush().context("failed to flush report")?;

    info!("Saved report to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestOutcome;
    use std::fs;

    #[test]
    fn test_save_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = Report::new();
        report.record("a", 10, &TestOutcome::pass(10));

        let path = save_report(&report, dir.path()).unwrap();
        assert_eq!(path, dir.path().join(REPORT_FILE));

        let raw = fs::read_to_string(&path).unwrap();
        let back: Report = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.score, 10);
        assert_eq!(back.full_score, 10);
    }

    #[test]
    fn test_save_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(REPORT_FILE), "stale contents").unwrap();

        let mut report = Report::new();
        report.record("a", 5, &TestOutcome::fail("nope"));
        save_report(&report, dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
        let back: Report = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.score, 0);
        assert_eq!(back.full_score, 5);
    }
}
