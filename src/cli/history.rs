//! History command handler.
//!
//! Implements the `history` subcommand: stability, velocity and risk trend
//! over stored changelogs, one report per API.

use crate::analysis::{group_by_api, HistoryAnalyzer};
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, load_history, render, write_output, OutputTarget};
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Run the history command, returning the desired exit code.
pub fn run_history(files: &[PathBuf], config: &AppConfig) -> Result<i32> {
    if files.is_empty() {
        bail!("at least one changelog file is required");
    }
    let quiet = config.behavior.quiet;

    let changelogs = load_history(files, quiet)?;
    let histories = group_by_api(changelogs);
    let analyzer = HistoryAnalyzer::from_config(config);
    let reports = analyzer.analyze_many(&histories);

    if !quiet {
        for (api, report) in &reports {
            tracing::info!(
                "{api}: stability {} ({}), {:.1} changes/week, risk {}",
                report.stability.overall_score,
                report.stability.grade.description(),
                report.velocity.changes_per_week,
                report.risk_trend.summary.direction,
            );
        }
    }

    let content = render(&reports, config.output.format, config.output.pretty)?;
    write_output(&content, &OutputTarget::from_option(config.output.file.clone()), quiet)?;

    Ok(exit_codes::SUCCESS)
}
