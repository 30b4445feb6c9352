//! Risk assessment of a single comparison and of a release history.

use super::chronological;
use super::trend::{Polarity, TrendSummary};
use crate::config::TrendConfig;
use crate::model::{
    count_by_severity, BreakingChange, Change, ChangeType, Changelog, RiskAssessment, RiskLevel,
    SemverBump,
};
use serde::{Deserialize, Serialize};

/// Points contributed by each breaking change.
const BREAKING_COUNT_POINTS: f64 = 20.0 * 0.5;
/// Weight of the mean breaking impact.
const IMPACT_WEIGHT: f64 = 0.3;
/// Weight of the breaking share, in percent.
const BREAKING_SHARE_WEIGHT: f64 = 0.2;

/// Assess the risk of a set of changes.
///
/// `breaking` carries the impact scores of the breaking subset of `changes`.
pub fn assess_risk(changes: &[Change], breaking: &[BreakingChange]) -> RiskAssessment {
    let total = changes.len();
    let breaking_count = changes.iter().filter(|c| c.is_breaking()).count();

    let overall_score = if total == 0 {
        0
    } else {
        let impact_avg = if breaking.is_empty() {
            0.0
        } else {
            breaking.iter().map(|b| f64::from(b.impact_score)).sum::<f64>() / breaking.len() as f64
        };
        let share = breaking_count as f64 / total as f64 * 100.0;
        let raw = (breaking_count as f64).mul_add(
            BREAKING_COUNT_POINTS,
            impact_avg.mul_add(IMPACT_WEIGHT, share * BREAKING_SHARE_WEIGHT),
        );
        raw.round().clamp(0.0, 100.0) as u8
    };

    let level = RiskLevel::from_score(overall_score);
    let semver_recommendation = if breaking_count > 0 {
        SemverBump::Major
    } else if changes.iter().any(|c| c.change_type == ChangeType::Added) {
        SemverBump::Minor
    } else {
        SemverBump::Patch
    };

    RiskAssessment {
        overall_score,
        level,
        breaking_changes_count: breaking_count,
        total_changes_count: total,
        semver_recommendation,
        recommendation: recommendation_for(level).to_string(),
        changes_by_severity: count_by_severity(changes),
    }
}

const fn recommendation_for(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => {
            "Critical risk: coordinate this release with all consumers \
             and publish a migration guide"
        }
        RiskLevel::High => {
            "High risk: notify consumers ahead of release and document every breaking change"
        }
        RiskLevel::Medium => "Medium risk: review the changes and call them out in release notes",
        RiskLevel::Low => "Low risk: safe to release",
    }
}

/// Risk over a release history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskTrend {
    /// Overall scores, oldest first
    pub scores: Vec<u8>,
    #[serde(flatten)]
    pub summary: TrendSummary,
    pub cumulative_breaking_changes: usize,
}

/// Analyze how risk developed over a history.
///
/// Uses each changelog's recorded score; nothing is re-assessed.
pub fn analyze_risk_trend(history: &[Changelog], config: &TrendConfig) -> RiskTrend {
    let history = chronological(history);
    let scores: Vec<u8> = history.iter().map(|c| c.risk.overall_score).collect();
    let series: Vec<f64> = scores.iter().map(|s| f64::from(*s)).collect();

    RiskTrend {
        summary: TrendSummary::from_series(&series, config, Polarity::LowerIsBetter),
        cumulative_breaking_changes: history.iter().map(|c| c.breaking_changes.len()).sum(),
        scores,
    }
}
