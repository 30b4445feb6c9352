//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod complexity;
mod diff;
mod history;

pub use complexity::{run_complexity, ComplexityReport, SnapshotComplexity};
pub use diff::{determine_exit_code, run_diff, DiffPaths};
pub use history::run_history;
