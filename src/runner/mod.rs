//! Sequential test scheduler (parent side)
//!
//! Drives one isolated worker process at a time: fresh result channel,
//! spawn, join with optional timeout, forced kill on overrun, outcome
//! collection into the report. Tests are never parallelized; they share one
//! mutable scratch directory and their ordering is part of the contract.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitStatus;
use tokio::process::Command;
use tokio::time;
use tracing::{info, warn};

use crate::executor::{CHANNEL_ENV, WORKER_ENV};
use crate::models::TestOutcome;
use crate::registry::{Registry, TestDefinition};
use crate::results::Report;
use crate::scratch;
use crate::utils::Timer;

/// Runs every registered test against a scratch snapshot of the target
pub struct Runner {
    registry: Registry,
}

impl Runner {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Execute all registered tests in registration order
    ///
    /// Snapshots the target, runs the init hook, executes each test in its
    /// own worker process, verifies the score invariant, runs the cleanup
    /// hook, and removes the scratch copy. Hooks run in this process at the
    /// original working directory.
    pub async fn run(&self, target: &Path) -> Result<Report> {
        let scratch = scratch::snapshot(target)?;
        let channels = tempfile::tempdir().context("failed to create channel directory")?;

        if let Some(hook) = self.registry.init_hook() {
            hook();
        }

        let mut report = Report::new();
        for (index, def) in self.registry.list().iter().enumerate() {
            info!("===== Running Test {} =====", def.name());
            let timer = Timer::start(def.name());

            // One single-use channel per test, discarded with the directory.
            let channel = channels.path().join(format!("outcome-{index}.json"));
            let outcome = self.run_one(def, scratch.path(), &channel).await?;

            timer.stop();
            info!("{}", outcome.detail);
            report.record(def.name(), def.points(), &outcome);
        }

        report.verify()?;

        if let Some(hook) = self.registry.cleanup_hook() {
            hook();
        }

        Ok(report)
    }

    /// Launch one worker and wait for it, enforcing the test's timeout
    async fn run_one(
        &self,
        def: &TestDefinition,
        scratch: &Path,
        channel: &Path,
    ) -> Result<TestOutcome> {
        let exe = std::env::current_exe().context("failed to locate harness executable")?;

        let mut child = Command::new(&exe)
            .env(WORKER_ENV, def.name())
            .env(CHANNEL_ENV, channel)
            .current_dir(scratch)
            .spawn()
            .with_context(|| format!("failed to spawn worker for {}", def.name()))?;

        let status = match def.timeout() {
            Some(limit) => match time::timeout(limit, child.wait()).await {
                Ok(status) => status.context("failed to await worker")?,
                Err(_) => {
                    // Non-cooperative: the child is killed, not signalled to stop.
                    warn!("Test {} exceeded {:?}, killing worker", def.name(), limit);
                    child
                        .kill()
                        .await
                        .context("failed to kill timed-out worker")?;
                    return Ok(TestOutcome::timeout());
                }
            },
            None => child.wait().await.context("failed to await worker")?,
        };

        Ok(read_outcome(channel, status))
    }
}

/// Read the single outcome the worker delivered over its channel
///
/// A child that exited without reporting (hard crash, abort) earns zero
/// points; the original would block forever waiting for it.
fn read_outcome(channel: &Path, status: ExitStatus) -> TestOutcome {
    match std::fs::read_to_string(channel) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(outcome) => outcome,
            Err(e) => TestOutcome::exception(format!("worker delivered a malformed outcome: {e}")),
        },
        Err(_) => TestOutcome::exception(format!(
            "test process exited without reporting an outcome ({status})"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestStatus;
    use crate::registry::TestDefinition;
    use std::fs;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn test_read_outcome_parses_channel() {
        let dir = tempfile::tempdir().unwrap();
        let channel = dir.path().join("outcome-0.json");
        let sent = TestOutcome::pass(10);
        fs::write(&channel, serde_json::to_vec(&sent).unwrap()).unwrap();

        let outcome = read_outcome(&channel, ExitStatus::from_raw(0));
        assert_eq!(outcome.status, TestStatus::Pass);
        assert_eq!(outcome.points_awarded, 10);
    }

    #[test]
    fn test_silent_worker_death_scores_zero() {
        let dir = tempfile::tempdir().unwrap();
        let channel = dir.path().join("outcome-0.json");

        let outcome = read_outcome(&channel, ExitStatus::from_raw(139));
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(outcome.status, TestStatus::Exception);
        assert!(outcome.detail.contains("without reporting"));
    }

    #[test]
    fn test_malformed_channel_scores_zero() {
        let dir = tempfile::tempdir().unwrap();
        let channel = dir.path().join("outcome-0.json");
        fs::write(&channel, "not json").unwrap();

        let outcome = read_outcome(&channel, ExitStatus::from_raw(0));
        assert_eq!(outcome.points_awarded, 0);
        assert!(outcome.detail.contains("malformed"));
    }

    #[test]
    fn test_runner_keeps_registry_order() {
        let mut registry = crate::registry::Registry::new();
        registry.register(TestDefinition::new("b", 5, || None));
        registry.register(TestDefinition::new("a", 5, || None));

        let runner = Runner::new(registry);
        let names: Vec<&str> = runner.registry().list().iter().map(|d| d.name()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
