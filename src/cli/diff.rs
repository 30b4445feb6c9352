//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two snapshots.

use crate::config::{AppConfig, BehaviorConfig};
use crate::diff::DiffEngine;
use crate::model::{Changelog, Severity};
use crate::pipeline::{exit_codes, load_optional_snapshot, render, write_output, OutputTarget};
use anyhow::Result;
use std::path::PathBuf;

/// Snapshot paths for a diff. Either may be the literal `none`.
#[derive(Debug, Clone)]
pub struct DiffPaths {
    pub old: PathBuf,
    pub new: PathBuf,
}

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_diff(paths: &DiffPaths, config: &AppConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let old = load_optional_snapshot(&paths.old, quiet)?;
    let new = load_optional_snapshot(&paths.new, quiet)?;

    let engine = DiffEngine::from_config(&config.diff);
    let changelog = engine.diff(old.as_ref(), new.as_ref());

    if !quiet {
        log_summary(&changelog);
    }

    let content = render(&changelog, config.output.format, config.output.pretty)?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, quiet)?;

    Ok(determine_exit_code(&config.behavior, &changelog))
}

fn log_summary(changelog: &Changelog) {
    let counts = changelog.changes_by_severity();
    let count = |s: Severity| counts.get(&s).copied().unwrap_or(0);
    tracing::info!(
        "{} changes ({} breaking, {} dangerous, {} warning, {} info); \
         risk {} ({}), recommend {} release",
        changelog.changes.len(),
        count(Severity::Breaking),
        count(Severity::Dangerous),
        count(Severity::Warning),
        count(Severity::Info),
        changelog.risk.overall_score,
        changelog.risk.level,
        changelog.risk.semver_recommendation,
    );
}

/// Determine the appropriate exit code based on the changelog and config flags.
#[must_use]
pub fn determine_exit_code(behavior: &BehaviorConfig, changelog: &Changelog) -> i32 {
    if behavior.fail_on_breaking && changelog.has_breaking_changes() {
        return exit_codes::BREAKING_CHANGES;
    }
    if behavior.fail_on_change && changelog.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
