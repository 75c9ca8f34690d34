//! CLI argument parsing
//!
//! Flags-only surface consumed by `harness_main`: the suite binary is itself
//! the command, so there are no subcommands.

use clap::Parser;

/// Process-isolated scoring harness
#[derive(Parser, Debug)]
#[command(about = "Grade a candidate repository with the registered test suite")]
#[command(long_about = None)]
pub struct Args {
    /// Path to the repository to grade
    #[arg(short, long, default_value = ".")]
    pub dir: String,

    /// List all registered tests without running them
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["demo-suite"]);
        assert_eq!(args.dir, ".");
        assert!(!args.list);
        assert!(!args.verbose);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["demo-suite", "-d", "/tmp/repo", "--list", "-v"]);
        assert_eq!(args.dir, "/tmp/repo");
        assert!(args.list);
        assert!(args.verbose);
    }
}
