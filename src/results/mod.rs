//! Score report assembly and persistence
//!
//! The runner builds one `Report` per invocation; `save_report` writes it to
//! `test.json` inside the original target directory.

mod report;
mod storage;

pub use report::Report;
pub use storage::{save_report, REPORT_FILE};
