//! GradeKit - process-isolated scoring harness
//!
//! Registers named test units (a callable, a point value, an optional
//! timeout, a description), executes each in its own child process against a
//! scratch snapshot of a target directory, enforces wall-clock timeouts by
//! killing overrunning workers, and aggregates a `score`/`full_score` report
//! persisted as `test.json` in the target directory.
//!
//! A grading suite is a small binary that builds a [`Registry`] and hands it
//! to [`harness_main`]:
//!
//! ```no_run
//! use gradekit::{harness_main, Registry, TestDefinition};
//!
//! fn readme_present() -> Option<String> {
//!     if std::path::Path::new("README.md").exists() {
//!         None
//!     } else {
//!         Some("README.md missing".to_string())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.register(
//!         TestDefinition::new("readme_present", 10, readme_present)
//!             .with_description("target repository ships a README"),
//!     );
//!     harness_main(registry)
//! }
//! ```
//!
//! ```bash
//! # Grade a repository
//! demo-suite --dir path/to/repo
//!
//! # List registered tests without running them
//! demo-suite --list
//!
//! # Show per-test progress and the final report
//! demo-suite --dir path/to/repo --verbose
//! ```

pub mod cli;
pub mod error;
pub mod executor;
pub mod models;
pub mod registry;
pub mod results;
pub mod runner;
pub mod scratch;
pub mod utils;

pub use error::HarnessError;
pub use models::{TestOutcome, TestStatus};
pub use registry::{Registry, TestDefinition};
pub use results::Report;
pub use runner::Runner;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Execution entrypoint for a grading suite binary
///
/// In a worker process (spawned by the runner with the worker environment
/// set) this runs exactly one test and exits. Otherwise it parses the CLI,
/// either lists the registered tests or runs them all against a scratch
/// snapshot of the target directory, and persists the report.
pub fn harness_main(registry: Registry) -> Result<()> {
    // Worker role is decided before any CLI parsing; workers get no args.
    if let Some(role) = executor::WorkerRole::from_env()? {
        return executor::worker_main(&registry, &role);
    }

    let args = cli::Args::parse();
    utils::init_logging(args.verbose);

    if args.list {
        for def in registry.list() {
            println!("{}({}): {}", def.name(), def.points(), def.description());
        }
        return Ok(());
    }

    let target = PathBuf::from(&args.dir);
    if !target.is_dir() {
        return Err(HarnessError::InvalidTarget(target).into());
    }
    let target = target.canonicalize()?;

    let runner = Runner::new(registry);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(runner.run(&target))?;

    if args.verbose {
        println!("===== Final Score =====");
        println!("{}", serde_json::to_string_pretty(&report)?);
        println!("=======================");
    }

    let path = results::save_report(&report, &target)?;
    println!("Output written to: {}", path.display());

    Ok(())
}
