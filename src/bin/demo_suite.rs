//! Example grading suite
//!
//! Checks a candidate repository for a handful of artifacts and exercises
//! every outcome the harness can produce: pass, fail, shared-scratch
//! hand-off between tests, timeout, and a panicking probe. Also serves as
//! the end-to-end target for the integration tests.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use gradekit::{harness_main, Registry, TestDefinition};

fn readme_present() -> Option<String> {
    if Path::new("README.md").exists() {
        None
    } else {
        Some("README.md missing".to_string())
    }
}

fn notes_present() -> Option<String> {
    if Path::new("NOTES.txt").exists() {
        None
    } else {
        Some("NOTES.txt missing".to_string())
    }
}

// Writes into the scratch copy; reads_marker below depends on this artifact.
fn writes_marker() -> Option<String> {
    if let Err(e) = fs::write("build.stamp", "stamped\n") {
        return Some(format!("could not write build.stamp: {e}"));
    }
    None
}

fn reads_marker() -> Option<String> {
    if Path::new("build.stamp").exists() {
        None
    } else {
        Some("build.stamp not left behind by writes_marker".to_string())
    }
}

fn slow_scan() -> Option<String> {
    thread::sleep(Duration::from_secs(5));
    None
}

fn broken_probe() -> Option<String> {
    panic!("probe exploded");
}

fn main() -> Result<()> {
    let mut registry = Registry::new();

    registry.register(
        TestDefinition::new("readme_present", 10, readme_present)
            .with_description("target repository ships a README"),
    );
    registry.register(
        TestDefinition::new("notes_present", 5, notes_present)
            .with_description("target repository ships release notes"),
    );
    registry.register(
        TestDefinition::new("writes_marker", 5, writes_marker)
            .with_description("leaves a build stamp in the scratch copy"),
    );
    registry.register(
        TestDefinition::new("reads_marker", 5, reads_marker)
            .with_description("sees the build stamp from the previous test"),
    );
    registry.register(
        TestDefinition::new("slow_scan", 5, slow_scan)
            .with_timeout(Duration::from_secs(1))
            .with_description("full scan of the repository (budgeted)"),
    );
    registry.register(
        TestDefinition::new("broken_probe", 5, broken_probe)
            .with_description("probe with a known crash"),
    );

    registry.register_init(|| tracing::info!("demo suite starting"));
    registry.register_cleanup(|| tracing::info!("demo suite finished"));

    harness_main(registry)
}
