//! Shared utilities
//!
//! Logging setup and a small timing helper.

mod logger;
mod timer;

pub use logger::init_logging;
pub use timer::Timer;
