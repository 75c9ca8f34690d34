//! Isolated test executor (worker side)
//!
//! Runs exactly one test definition inside its own process so a crash or
//! infinite loop in the test body cannot corrupt the runner. The runner
//! re-executes the current binary with two environment variables set: the
//! name of the test to run and the path of the single-use result channel.
//! The worker looks the test up in the rebuilt registry, executes it, writes
//! the JSON-encoded outcome to the channel exactly once, and exits.

use anyhow::{Context, Result};
use std::backtrace::Backtrace;
use std::env;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::error::HarnessError;
use crate::models::TestOutcome;
use crate::registry::{Registry, TestDefinition};

/// Names the test a worker process must run
pub const WORKER_ENV: &str = "GRADEKIT_WORKER";

/// Path of the result channel a worker must write its outcome to
pub const CHANNEL_ENV: &str = "GRADEKIT_OUTCOME";

/// Role assigned to a worker process by the runner
#[derive(Clone, Debug)]
pub struct WorkerRole {
    pub test: String,
    pub channel: PathBuf,
}

impl WorkerRole {
    /// Detect whether this process was launched as a worker
    ///
    /// Returns `Ok(None)` for a normal (parent) invocation. A worker
    /// launched without a channel path is a protocol error.
    pub fn from_env() -> Result<Option<Self>, HarnessError> {
        let Some(test) = env::var_os(WORKER_ENV) else {
            return Ok(None);
        };
        let channel = env::var_os(CHANNEL_ENV).ok_or(HarnessError::MissingChannel)?;

        Ok(Some(Self {
            test: test.to_string_lossy().into_owned(),
            channel: PathBuf::from(channel),
        }))
    }
}

/// Worker entrypoint: execute one test and deliver its outcome
///
/// The current working directory is already the scratch copy; the test body
/// may read and write it freely. Side effects are left in place for later
/// tests to observe.
pub fn worker_main(registry: &Registry, role: &WorkerRole) -> Result<()> {
    let def = registry
        .get(&role.test)
        .ok_or_else(|| HarnessError::UnknownTest(role.test.clone()))?;

    let outcome = execute(def);
    let payload = serde_json::to_vec(&outcome).context("failed to encode test outcome")?;
    fs::write(&role.channel, payload).context("failed to deliver test outcome")?;
    Ok(())
}

static LAST_PANIC: Mutex<Option<String>> = Mutex::new(None);

/// Run one test body to completion or failure
///
/// Verdict convention: a `None` or empty return means the test passed and
/// earns full points; a non-empty message means failure with zero points and
/// the message as detail. A panic earns zero points and the captured panic
/// message plus backtrace as detail, echoed to stderr for diagnostics.
pub fn execute(def: &TestDefinition) -> TestOutcome {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        let mut slot = LAST_PANIC.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(format!("{info}\nstack backtrace:\n{backtrace}"));
    }));

    let verdict = panic::catch_unwind(AssertUnwindSafe(|| def.call()));
    panic::set_hook(previous);

    match verdict {
        Ok(None) => TestOutcome::pass(def.points()),
        Ok(Some(detail)) if detail.is_empty() => TestOutcome::pass(def.points()),
        Ok(Some(detail)) => TestOutcome::fail(detail),
        Err(payload) => {
            let trace = LAST_PANIC
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
                .unwrap_or_else(|| payload_text(payload.as_ref()));

            eprintln!("Exception in {}:\n{trace}\n", def.name());
            TestOutcome::exception(trace)
        }
    }
}

fn payload_text(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unrecognized panic payload".to_string()
    }
}
