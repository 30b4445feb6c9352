//! Structural complexity and technical debt of a single snapshot.

use super::trend::{Polarity, TrendDirection, TrendSummary};
use crate::config::TrendConfig;
use crate::diff::endpoint_identity;
use crate::model::Snapshot;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Weights of the endpoint, parameter, response and schema sub-scores.
const COMPOSITE_WEIGHTS: [f64; 4] = [0.30, 0.25, 0.20, 0.25];

/// Paths made only of lowercase letters, digits, slashes, braces and dashes.
const NAMING_PATTERN: &str = r"^[a-z0-9/{}\-]*$";

fn naming_regex() -> Option<&'static Regex> {
    static NAMING: OnceLock<Option<Regex>> = OnceLock::new();
    NAMING.get_or_init(|| Regex::new(NAMING_PATTERN).ok()).as_ref()
}

/// Complexity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexityLevel {
    Simple,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ComplexityLevel {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=19 => Self::Simple,
            20..=39 => Self::Low,
            40..=59 => Self::Moderate,
            60..=79 => Self::High,
            _ => Self::VeryHigh,
        }
    }
}

/// Raw size counts of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    pub endpoint_count: usize,
    pub parameter_count: usize,
    pub required_parameter_count: usize,
    pub max_parameters: usize,
    pub response_count: usize,
    pub request_body_count: usize,
    pub type_count: usize,
}

/// Complexity of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct ComplexityScore {
    /// 0-100
    pub score: u8,
    pub level: ComplexityLevel,
    pub is_complex: bool,
    pub endpoint_score: f64,
    pub parameter_score: f64,
    pub response_score: f64,
    pub schema_score: f64,
    pub metrics: ComplexityMetrics,
}

/// Maintenance debt indicators of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct TechnicalDebt {
    /// 0-100
    pub score: u8,
    pub deprecated_endpoints: Vec<String>,
    pub undocumented_endpoints: Vec<String>,
    pub naming_violations: Vec<String>,
}

impl TechnicalDebt {
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.deprecated_endpoints.len()
            + self.undocumented_endpoints.len()
            + self.naming_violations.len()
    }
}

fn metrics_of(snapshot: &Snapshot) -> ComplexityMetrics {
    let endpoints = &snapshot.endpoints;
    ComplexityMetrics {
        endpoint_count: endpoints.len(),
        parameter_count: snapshot.parameter_count(),
        required_parameter_count: endpoints
            .iter()
            .flat_map(|e| &e.parameters)
            .filter(|p| p.required)
            .count(),
        max_parameters: endpoints.iter().map(|e| e.parameters.len()).max().unwrap_or(0),
        response_count: endpoints.iter().map(|e| e.responses.len()).sum(),
        request_body_count: endpoints.iter().filter(|e| e.request_body.is_some()).count(),
        type_count: snapshot.types.len(),
    }
}

fn endpoint_score(count: usize) -> f64 {
    let count = count as f64;
    let score = if count <= 10.0 {
        count * 3.0
    } else if count <= 50.0 {
        (count - 10.0).mul_add(1.25, 30.0)
    } else {
        (count - 50.0).mul_add(0.2, 80.0)
    };
    score.min(100.0)
}

fn parameter_score(metrics: &ComplexityMetrics) -> f64 {
    if metrics.endpoint_count == 0 || metrics.parameter_count == 0 {
        return 0.0;
    }
    let avg = metrics.parameter_count as f64 / metrics.endpoint_count as f64;
    let required_share =
        metrics.required_parameter_count as f64 / metrics.parameter_count as f64 * 100.0;
    0.4 * (avg * 10.0).min(100.0)
        + 0.3 * (metrics.max_parameters as f64 * 5.0).min(100.0)
        + 0.3 * required_share
}

fn response_score(metrics: &ComplexityMetrics) -> f64 {
    if metrics.endpoint_count == 0 {
        return 0.0;
    }
    let avg = metrics.response_count as f64 / metrics.endpoint_count as f64;
    let score = if avg <= 2.0 {
        avg * 15.0
    } else if avg <= 5.0 {
        (avg - 2.0).mul_add(15.0, 30.0)
    } else {
        (avg - 5.0).mul_add(5.0, 75.0)
    };
    score.min(100.0)
}

fn schema_score(metrics: &ComplexityMetrics) -> f64 {
    let count = metrics.response_count + metrics.request_body_count + metrics.type_count;
    (2.0 * count as f64).min(100.0)
}

/// Score the structural complexity of a snapshot.
pub fn analyze_complexity(snapshot: &Snapshot) -> ComplexityScore {
    let metrics = metrics_of(snapshot);
    let parts = [
        endpoint_score(metrics.endpoint_count),
        parameter_score(&metrics),
        response_score(&metrics),
        schema_score(&metrics),
    ];
    let composite: f64 = parts.iter().zip(COMPOSITE_WEIGHTS).map(|(s, w)| s * w).sum();
    let score = composite.round().clamp(0.0, 100.0) as u8;
    let level = ComplexityLevel::from_score(score);

    ComplexityScore {
        score,
        level,
        is_complex: level >= ComplexityLevel::High,
        endpoint_score: parts[0],
        parameter_score: parts[1],
        response_score: parts[2],
        schema_score: parts[3],
        metrics,
    }
}

/// Collect deprecated, undocumented and badly named endpoints.
pub fn analyze_technical_debt(snapshot: &Snapshot) -> TechnicalDebt {
    let total = snapshot.endpoints.len();
    if total == 0 {
        return TechnicalDebt::default();
    }

    let mut debt = TechnicalDebt::default();
    for (index, endpoint) in snapshot.endpoints.iter().enumerate() {
        let identity = endpoint_identity(endpoint, index);
        if endpoint.deprecated {
            debt.deprecated_endpoints.push(identity.clone());
        }
        if !endpoint.is_documented() {
            debt.undocumented_endpoints.push(identity.clone());
        }
        let conforms = naming_regex().map_or(true, |re| re.is_match(&endpoint.path));
        if !conforms {
            debt.naming_violations.push(identity);
        }
    }

    let ratio = debt.issue_count() as f64 / (3 * total) as f64;
    debt.score = (100.0 * ratio).round().clamp(0.0, 100.0) as u8;
    debt
}

/// One snapshot's position in a complexity trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityPoint {
    pub version: String,
    pub score: u8,
    pub debt_score: u8,
}

/// How complexity and debt developed over a sequence of snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityTrend {
    /// Oldest first
    pub points: Vec<ComplexityPoint>,
    #[serde(flatten)]
    pub summary: TrendSummary,
    pub debt_direction: TrendDirection,
}

/// Analyze complexity over snapshots given oldest first.
pub fn analyze_complexity_trend(snapshots: &[Snapshot], config: &TrendConfig) -> ComplexityTrend {
    let points: Vec<ComplexityPoint> = snapshots
        .iter()
        .map(|snapshot| ComplexityPoint {
            version: snapshot.version.clone(),
            score: analyze_complexity(snapshot).score,
            debt_score: analyze_technical_debt(snapshot).score,
        })
        .collect();

    let scores: Vec<f64> = points.iter().map(|p| f64::from(p.score)).collect();
    let debt: Vec<f64> = points.iter().map(|p| f64::from(p.debt_score)).collect();

    ComplexityTrend {
        summary: TrendSummary::from_series(&scores, config, Polarity::LowerIsBetter),
        debt_direction: TrendDirection::of_series(
            &debt,
            config.slope_threshold,
            Polarity::LowerIsBetter,
        ),
        points,
    }
}
