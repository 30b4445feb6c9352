//! Pipeline stages shared by the CLI command handlers.
//!
//! Load documents → diff or analyze → render → write.

mod load;
mod output;

pub use load::{
    load_history, load_optional_snapshot, load_snapshot, DocumentFormat, ABSENT_SNAPSHOT,
};
pub use output::{render, write_output, OutputTarget};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or no failure flag set)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected (`--fail-on-change`)
    pub const CHANGES_DETECTED: i32 = 1;
    /// Breaking changes were detected (`--fail-on-breaking`)
    pub const BREAKING_CHANGES: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
