//! Complexity command handler.
//!
//! Scores complexity and technical debt for each snapshot, plus the trend
//! across them when more than one is given (oldest first).

use crate::analysis::{
    analyze_complexity, analyze_complexity_trend, analyze_technical_debt, ComplexityScore,
    ComplexityTrend, TechnicalDebt,
};
use crate::config::AppConfig;
use crate::model::Snapshot;
use crate::pipeline::{exit_codes, load_snapshot, render, write_output, OutputTarget};
use anyhow::{bail, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Complexity of one snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotComplexity {
    pub name: String,
    pub version: String,
    pub complexity: ComplexityScore,
    pub technical_debt: TechnicalDebt,
}

/// Output of the `complexity` command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    pub snapshots: Vec<SnapshotComplexity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<ComplexityTrend>,
}

impl ComplexityReport {
    #[must_use]
    pub fn from_snapshots(snapshots: &[Snapshot], config: &AppConfig) -> Self {
        Self {
            snapshots: snapshots
                .iter()
                .map(|s| SnapshotComplexity {
                    name: s.name.clone(),
                    version: s.version.clone(),
                    complexity: analyze_complexity(s),
                    technical_debt: analyze_technical_debt(s),
                })
                .collect(),
            trend: (snapshots.len() > 1)
                .then(|| analyze_complexity_trend(snapshots, &config.trend)),
        }
    }
}

/// Run the complexity command, returning the desired exit code.
pub fn run_complexity(files: &[PathBuf], config: &AppConfig) -> Result<i32> {
    if files.is_empty() {
        bail!("at least one snapshot file is required");
    }
    let quiet = config.behavior.quiet;

    let snapshots = files
        .iter()
        .map(|path| load_snapshot(path, quiet))
        .collect::<Result<Vec<_>, _>>()?;
    let report = ComplexityReport::from_snapshots(&snapshots, config);

    let content = render(&report, config.output.format, config.output.pretty)?;
    write_output(&content, &OutputTarget::from_option(config.output.file.clone()), quiet)?;

    Ok(exit_codes::SUCCESS)
}
