//! Risk, stability, velocity and complexity analytics.
//!
//! Everything here is a pure function of its inputs. Histories are ordered
//! oldest first; functions that take a history sort it by `generatedAt` when
//! it arrives out of order.

mod complexity;
mod history;
mod risk;
mod stability;
pub mod trend;
mod velocity;

pub use complexity::{
    analyze_complexity, analyze_complexity_trend, analyze_technical_debt, ComplexityLevel,
    ComplexityMetrics, ComplexityPoint, ComplexityScore, ComplexityTrend, TechnicalDebt,
};
pub use history::{group_by_api, HistoryAnalyzer, HistoryReport};
pub use risk::{analyze_risk_trend, assess_risk, RiskTrend};
pub use stability::{
    Recommendation, StabilityFactor, StabilityFactors, StabilityGrade, StabilityScore,
    StabilityScorer,
};
pub use trend::{Movement, Polarity, TrendDirection, TrendSummary};
pub use velocity::{ChangeVelocity, VelocityCalculator, VelocityLevel};

use crate::model::Changelog;
use std::borrow::Cow;

/// Borrow the history if it is already chronological, else sort a copy.
///
/// The sort is stable, so changelogs sharing a timestamp keep their order.
pub(crate) fn chronological(history: &[Changelog]) -> Cow<'_, [Changelog]> {
    if history
        .windows(2)
        .all(|w| w[0].generated_at <= w[1].generated_at)
    {
        Cow::Borrowed(history)
    } else {
        let mut sorted = history.to_vec();
        sorted.sort_by_key(|c| c.generated_at);
        Cow::Owned(sorted)
    }
}
