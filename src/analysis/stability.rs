//! Stability scoring of a release history.
//!
//! Four factors, each 0-100, are combined with configurable weights:
//!
//! | Factor | Perfect when |
//! |--------|--------------|
//! | Breaking ratio | no change is breaking |
//! | Time between breaking | breaking releases are at least 90 days apart |
//! | Deprecation management | every breaking release also deprecates something |
//! | Semver compliance | every breaking release bumps the major version |

use super::chronological;
use crate::config::StabilityWeights;
use crate::model::Changelog;
use crate::utils::is_major_bump;
use serde::{Deserialize, Serialize};

/// Breaking ratio at which the ratio factor bottoms out.
const MAX_BREAKING_RATIO: f64 = 0.5;
/// Average gap between breaking releases that earns full marks.
const TARGET_DAYS_BETWEEN_BREAKING: f64 = 90.0;
/// Factors scoring below this produce a recommendation.
const RECOMMENDATION_THRESHOLD: f64 = 70.0;
/// Factors scoring below this produce a top-priority recommendation.
const URGENT_THRESHOLD: f64 = 40.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Stability grade based on score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityGrade {
    /// 90-100
    A,
    /// 80-89
    B,
    /// 70-79
    C,
    /// 60-69
    D,
    /// <60
    F,
}

impl StabilityGrade {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::A,
            80..=89 => Self::B,
            70..=79 => Self::C,
            60..=69 => Self::D,
            _ => Self::F,
        }
    }

    #[must_use]
    pub const fn letter(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::A => "Very Stable",
            Self::B => "Stable",
            Self::C => "Moderately Stable",
            Self::D => "Unstable",
            Self::F => "Very Unstable",
        }
    }
}

/// The individual stability factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StabilityFactor {
    BreakingRatio,
    TimeBetweenBreaking,
    DeprecationManagement,
    SemverCompliance,
}

impl StabilityFactor {
    pub const ALL: [Self; 4] = [
        Self::BreakingRatio,
        Self::TimeBetweenBreaking,
        Self::DeprecationManagement,
        Self::SemverCompliance,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BreakingRatio => "Breaking Ratio",
            Self::TimeBetweenBreaking => "Time Between Breaking Changes",
            Self::DeprecationManagement => "Deprecation Management",
            Self::SemverCompliance => "Semver Compliance",
        }
    }

    const fn advice(&self) -> &'static str {
        match self {
            Self::BreakingRatio => {
                "A large share of changes is breaking; prefer additive changes and optional fields"
            }
            Self::TimeBetweenBreaking => {
                "Breaking releases come in quick succession; \
                 batch breaking changes into fewer major releases"
            }
            Self::DeprecationManagement => {
                "Breaking releases arrive without deprecations; deprecate before removing"
            }
            Self::SemverCompliance => {
                "Breaking releases do not bump the major version; follow semantic versioning"
            }
        }
    }
}

/// Per-factor scores (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityFactors {
    pub breaking_ratio: f64,
    pub time_between_breaking: f64,
    pub deprecation_management: f64,
    pub semver_compliance: f64,
}

impl Default for StabilityFactors {
    fn default() -> Self {
        Self {
            breaking_ratio: 100.0,
            time_between_breaking: 100.0,
            deprecation_management: 100.0,
            semver_compliance: 100.0,
        }
    }
}

impl StabilityFactors {
    /// Factors in [`StabilityFactor::ALL`] order
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [
            self.breaking_ratio,
            self.time_between_breaking,
            self.deprecation_management,
            self.semver_compliance,
        ]
    }
}

/// Recommendation for improving stability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Priority (1 = highest)
    pub priority: u8,
    pub factor: StabilityFactor,
    pub message: String,
    /// Points the overall score would gain if the factor were perfect
    pub impact: f64,
}

/// Stability of one API over its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct StabilityScore {
    /// 0-100
    pub overall_score: u8,
    pub grade: StabilityGrade,
    pub factors: StabilityFactors,
    /// Highest priority first
    pub recommendations: Vec<Recommendation>,
    pub changelogs_analyzed: usize,
    pub total_changes: usize,
    pub breaking_changes: usize,
}

/// Scores release histories for stability.
#[derive(Debug, Clone, Default)]
pub struct StabilityScorer {
    weights: StabilityWeights,
}

impl StabilityScorer {
    #[must_use]
    pub const fn new(weights: StabilityWeights) -> Self {
        Self { weights }
    }

    /// Score a history. Empty histories are perfectly stable.
    pub fn score(&self, history: &[Changelog]) -> StabilityScore {
        let history = chronological(history);

        let factors = StabilityFactors {
            breaking_ratio: breaking_ratio_score(&history),
            time_between_breaking: time_between_breaking_score(&history),
            deprecation_management: deprecation_score(&history),
            semver_compliance: semver_compliance_score(&history),
        };

        let weights = self.weights.renormalize();
        let weighted: f64 = factors
            .as_array()
            .iter()
            .zip(weights.iter())
            .map(|(score, weight)| score * weight)
            .sum();
        let overall_score = weighted.round().clamp(0.0, 100.0) as u8;

        StabilityScore {
            overall_score,
            grade: StabilityGrade::from_score(overall_score),
            recommendations: recommendations(&factors, &weights),
            factors,
            changelogs_analyzed: history.len(),
            total_changes: history.iter().map(|c| c.changes.len()).sum(),
            breaking_changes: history.iter().map(|c| c.breaking_changes.len()).sum(),
        }
    }
}

fn breaking_ratio_score(history: &[Changelog]) -> f64 {
    let total: usize = history.iter().map(|c| c.changes.len()).sum();
    if total == 0 {
        return 100.0;
    }
    let breaking: usize = history.iter().map(|c| c.breaking_changes.len()).sum();
    let ratio = breaking as f64 / total as f64;
    if ratio >= MAX_BREAKING_RATIO {
        0.0
    } else {
        100.0 * (1.0 - ratio / MAX_BREAKING_RATIO)
    }
}

fn time_between_breaking_score(history: &[Changelog]) -> f64 {
    let timestamps: Vec<_> = history
        .iter()
        .filter(|c| c.has_breaking_changes())
        .map(|c| c.generated_at)
        .collect();
    if timestamps.len() < 2 {
        return 100.0;
    }

    let gaps: Vec<f64> = timestamps
        .windows(2)
        .map(|w| (w[1] - w[0]).num_seconds() as f64 / SECONDS_PER_DAY)
        .collect();
    let avg = gaps.iter().sum::<f64>() / gaps.len() as f64;

    if avg >= TARGET_DAYS_BETWEEN_BREAKING {
        100.0
    } else {
        (100.0 * avg / TARGET_DAYS_BETWEEN_BREAKING).max(0.0)
    }
}

fn deprecation_score(history: &[Changelog]) -> f64 {
    let breaking: Vec<&Changelog> = history.iter().filter(|c| c.has_breaking_changes()).collect();
    if breaking.is_empty() {
        return 100.0;
    }
    let undeprecated = breaking.iter().filter(|c| !c.mentions_deprecation()).count();
    100.0 * (1.0 - undeprecated as f64 / breaking.len() as f64)
}

fn semver_compliance_score(history: &[Changelog]) -> f64 {
    let (mut compliant, mut non_compliant) = (0usize, 0usize);
    for changelog in history {
        let (Some(from), Some(to)) = (&changelog.from_version, &changelog.to_version) else {
            continue;
        };
        if !changelog.has_breaking_changes() || is_major_bump(from, to) {
            compliant += 1;
        } else {
            non_compliant += 1;
        }
    }

    let comparable = compliant + non_compliant;
    if comparable == 0 {
        100.0
    } else {
        100.0 * compliant as f64 / comparable as f64
    }
}

fn recommendations(factors: &StabilityFactors, weights: &[f64; 4]) -> Vec<Recommendation> {
    let mut recs: Vec<Recommendation> = StabilityFactor::ALL
        .iter()
        .zip(factors.as_array())
        .zip(weights.iter())
        .filter(|((_, score), _)| *score < RECOMMENDATION_THRESHOLD)
        .map(|((factor, score), weight)| Recommendation {
            priority: if score < URGENT_THRESHOLD { 1 } else { 2 },
            factor: *factor,
            message: format!("{} scored {score:.0}: {}", factor.name(), factor.advice()),
            impact: (100.0 - score) * weight,
        })
        .collect();

    recs.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.impact.total_cmp(&a.impact))
    });
    recs
}
