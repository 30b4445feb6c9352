//! Combined analytics over release histories.

use super::risk::{analyze_risk_trend, RiskTrend};
use super::stability::{StabilityScore, StabilityScorer};
use super::velocity::{ChangeVelocity, VelocityCalculator};
use crate::config::{AppConfig, TrendConfig};
use crate::model::Changelog;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Full analytics report for one API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct HistoryReport {
    pub api_name: String,
    pub changelog_count: usize,
    pub stability: StabilityScore,
    pub velocity: ChangeVelocity,
    pub risk_trend: RiskTrend,
}

/// Runs stability, velocity and risk-trend analysis with shared settings.
#[derive(Debug, Clone, Default)]
pub struct HistoryAnalyzer {
    stability: StabilityScorer,
    velocity: VelocityCalculator,
    trend: TrendConfig,
}

impl HistoryAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            stability: StabilityScorer::new(config.stability.clone()),
            velocity: VelocityCalculator::new(config.velocity.clone()),
            trend: config.trend,
        }
    }

    /// Analyze one API's history.
    ///
    /// The report is named after the first changelog's API; an empty history
    /// yields an unnamed report with neutral scores.
    pub fn analyze(&self, history: &[Changelog]) -> HistoryReport {
        let api_name = history.first().map(|c| c.api_name.clone()).unwrap_or_default();
        self.analyze_named(api_name, history)
    }

    fn analyze_named(&self, api_name: String, history: &[Changelog]) -> HistoryReport {
        debug!("Analyzing {} changelogs for '{}'", history.len(), api_name);
        HistoryReport {
            changelog_count: history.len(),
            stability: self.stability.score(history),
            velocity: self.velocity.calculate(history),
            risk_trend: analyze_risk_trend(history, &self.trend),
            api_name,
        }
    }

    /// Analyze several independent histories in parallel, keyed by API name.
    #[must_use]
    pub fn analyze_many(
        &self,
        histories: &BTreeMap<String, Vec<Changelog>>,
    ) -> BTreeMap<String, HistoryReport> {
        histories
            .par_iter()
            .map(|(name, history)| (name.clone(), self.analyze_named(name.clone(), history)))
            .collect()
    }
}

/// Group changelogs by API name, keeping their relative order.
#[must_use]
pub fn group_by_api(changelogs: Vec<Changelog>) -> BTreeMap<String, Vec<Changelog>> {
    let mut groups: BTreeMap<String, Vec<Changelog>> = BTreeMap::new();
    for changelog in changelogs {
        groups.entry(changelog.api_name.clone()).or_default().push(changelog);
    }
    groups
}
