//! Change velocity of a release history.

use super::chronological;
use crate::config::VelocityConfig;
use crate::model::Changelog;
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// How fast an API is changing, by changes per week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VelocityLevel {
    #[default]
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl VelocityLevel {
    #[must_use]
    pub fn from_changes_per_week(per_week: f64) -> Self {
        if per_week < 5.0 {
            Self::Low
        } else if per_week < 20.0 {
            Self::Moderate
        } else if per_week < 50.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

/// Rate of change over a history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct ChangeVelocity {
    pub total_changes: usize,
    pub total_breaking_changes: usize,
    /// Inclusive calendar days covered, at least 1
    pub days: i64,
    pub changes_per_day: f64,
    pub changes_per_week: f64,
    pub changes_per_month: f64,
    pub average_days_between_releases: f64,
    pub accelerating: bool,
    /// Relative growth of the per-release average between the two halves
    pub acceleration_rate: f64,
    pub level: VelocityLevel,
    pub peak_changes_in_release: usize,
}

/// Computes [`ChangeVelocity`] for a history.
#[derive(Debug, Clone, Default)]
pub struct VelocityCalculator {
    config: VelocityConfig,
}

impl VelocityCalculator {
    #[must_use]
    pub const fn new(config: VelocityConfig) -> Self {
        Self { config }
    }

    pub fn calculate(&self, history: &[Changelog]) -> ChangeVelocity {
        let history = chronological(history);
        let (Some(first), Some(last)) = (history.first(), history.last()) else {
            return ChangeVelocity::default();
        };

        let counts: Vec<usize> = history.iter().map(|c| c.changes.len()).collect();
        let total_changes: usize = counts.iter().sum();
        let days = calendar_days(first, last);

        let changes_per_day = total_changes as f64 / days as f64;
        let changes_per_week = changes_per_day * 7.0;
        let (accelerating, acceleration_rate) = self.acceleration(&counts);

        ChangeVelocity {
            total_changes,
            total_breaking_changes: history.iter().map(|c| c.breaking_changes.len()).sum(),
            days,
            changes_per_day,
            changes_per_week,
            changes_per_month: changes_per_day * 30.0,
            average_days_between_releases: average_gap_days(&history),
            accelerating,
            acceleration_rate,
            level: VelocityLevel::from_changes_per_week(changes_per_week),
            peak_changes_in_release: counts.iter().copied().max().unwrap_or(0),
        }
    }

    /// Compare the two halves of the per-release change counts.
    fn acceleration(&self, counts: &[usize]) -> (bool, f64) {
        if counts.len() < self.config.min_releases_for_acceleration.max(2) {
            return (false, 0.0);
        }
        let (first_half, second_half) = counts.split_at(counts.len() / 2);
        let first: usize = first_half.iter().sum();
        let second: usize = second_half.iter().sum();

        let accelerating = if first == 0 {
            second > 0
        } else {
            second as f64 / first as f64 > self.config.acceleration_ratio
        };

        let first_avg = first as f64 / first_half.len() as f64;
        let second_avg = second as f64 / second_half.len() as f64;
        let rate = if first_avg == 0.0 {
            0.0
        } else {
            (second_avg - first_avg) / first_avg
        };
        (accelerating, rate)
    }
}

fn calendar_days(first: &Changelog, last: &Changelog) -> i64 {
    let span = (last.generated_at.date_naive() - first.generated_at.date_naive()).num_days();
    (span + 1).max(1)
}

fn average_gap_days(history: &[Changelog]) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }
    let total: f64 = history
        .windows(2)
        .map(|w| (w[1].generated_at - w[0].generated_at).num_seconds() as f64 / SECONDS_PER_DAY)
        .sum();
    total / (history.len() - 1) as f64
}
