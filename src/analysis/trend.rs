//! Numeric series trend analysis.
//!
//! Series are ordered oldest to newest. Regression works on raw values; the
//! meaning of "rising" is only decided when a [`Polarity`] is applied.

use crate::config::TrendConfig;
use serde::{Deserialize, Serialize};

/// Fewest points for which a direction is reported.
pub const MIN_TREND_POINTS: usize = 3;

/// Raw movement of a series, independent of whether higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Movement {
    Rising,
    Flat,
    Falling,
}

/// Which way a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Risk, complexity, debt
    LowerIsBetter,
    /// Stability scores
    HigherIsBetter,
}

/// Direction of a metric over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Improving,
    Stable,
    Degrading,
}

impl TrendDirection {
    /// Interpret a movement under a polarity.
    #[must_use]
    pub const fn from_movement(movement: Movement, polarity: Polarity) -> Self {
        match (movement, polarity) {
            (Movement::Flat, _) => Self::Stable,
            (Movement::Rising, Polarity::LowerIsBetter)
            | (Movement::Falling, Polarity::HigherIsBetter) => Self::Degrading,
            (Movement::Falling, Polarity::LowerIsBetter)
            | (Movement::Rising, Polarity::HigherIsBetter) => Self::Improving,
        }
    }

    /// Classify a whole series. Fewer than three points are always stable.
    #[must_use]
    pub fn of_series(values: &[f64], threshold: f64, polarity: Polarity) -> Self {
        if values.len() < MIN_TREND_POINTS {
            return Self::Stable;
        }
        Self::from_movement(movement(slope(values), threshold), polarity)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Degrading => "degrading",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordinary least-squares slope of `values` against `0..n`.
#[must_use]
pub fn slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = average(values);

    let (mut numerator, mut denominator) = (0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Classify a slope against a symmetric threshold.
#[must_use]
pub fn movement(slope: f64, threshold: f64) -> Movement {
    if slope > threshold {
        Movement::Rising
    } else if slope < -threshold {
        Movement::Falling
    } else {
        Movement::Flat
    }
}

/// Arithmetic mean; 0 for an empty series.
#[must_use]
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for an empty series.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = average(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Whether the latest value moved by at least `ratio` relative to the one
/// before it.
#[must_use]
pub fn significant_recent_change(values: &[f64], ratio: f64) -> bool {
    let [.., prev, last] = values else {
        return false;
    };
    if *prev == 0.0 {
        return *last > 0.0;
    }
    ((last - prev) / prev).abs() >= ratio
}

/// Summary statistics of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub average: f64,
    /// Population standard deviation
    pub volatility: f64,
    pub slope: f64,
    pub direction: TrendDirection,
    pub significant_recent_change: bool,
}

impl TrendSummary {
    #[must_use]
    pub fn from_series(values: &[f64], config: &TrendConfig, polarity: Polarity) -> Self {
        Self {
            average: average(values),
            volatility: std_dev(values),
            slope: slope(values),
            direction: TrendDirection::of_series(values, config.slope_threshold, polarity),
            significant_recent_change: significant_recent_change(
                values,
                config.significant_change_ratio,
            ),
        }
    }
}
