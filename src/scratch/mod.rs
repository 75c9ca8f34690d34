//! Scratch directory snapshot
//!
//! Tests never run against the target repository itself; they run against a
//! disposable copy so a broken test cannot damage the original. The copy is
//! a single shared mutable resource: every test process works in it in turn
//! and later tests observe earlier tests' writes. It is removed when the
//! returned handle is dropped at the end of the run.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

/// Copy the target tree into a fresh private scratch directory
pub fn snapshot(target: &Path) -> Result<TempDir> {
    let scratch = tempfile::Builder::new()
        .prefix("gradekit-")
        .tempdir()
        .context("failed to create scratch directory")?;

    let mut copied = 0usize;
    for entry in WalkDir::new(target) {
        let entry = entry.context("failed to walk target directory")?;
        let rel = entry
            .path()
            .strip_prefix(target)
            .context("walked entry outside the target directory")?;
        if rel.as_os_str().is_empty() {
            continue;
        }

        let dest = scratch.path().join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)
                .with_context(|| format!("failed to create {}", dest.display()))?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)
                .with_context(|| format!("failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }

    debug!(
        "Snapshot of {} ready at {} ({copied} files)",
        target.display(),
        scratch.path().display()
    );
    Ok(scratch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_copies_nested_tree() {
        let source = tempfile::tempdir().unwrap();
        fs::create_dir_all(source.path().join("src/deep")).unwrap();
        fs::write(source.path().join("README.md"), "# hello\n").unwrap();
        fs::write(source.path().join("src/deep/main.c"), "int main;").unwrap();

        let scratch = snapshot(source.path()).unwrap();
        assert!(scratch.path().join("README.md").exists());
        let copied = fs::read_to_string(scratch.path().join("src/deep/main.c")).unwrap();
        assert_eq!(copied, "int main;");
    }

    #[test]
    fn test_scratch_writes_do_not_touch_target() {
        let source = tempfile::tempdir().unwrap();
        fs::write(source.path().join("a.txt"), "a").unwrap();

        let scratch = snapshot(source.path()).unwrap();
        fs::write(scratch.path().join("artifact.txt"), "made by a test").unwrap();

        assert!(!source.path().join("artifact.txt").exists());
    }

    #[test]
    fn test_scratch_is_removed_on_drop() {
        let source = tempfile::tempdir().unwrap();
        let scratch = snapshot(source.path()).unwrap();
        let path = scratch.path().to_path_buf();
        drop(scratch);
        assert!(!path.exists());
    }
}
