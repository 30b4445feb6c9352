//! Integration tests for history analytics
//!
//! Stability, velocity and risk trend over stored changelogs, loaded from
//! fixtures or produced by the diff engine.

use api_changelog::{
    analysis::{
        analyze_complexity_trend, analyze_risk_trend, group_by_api, StabilityGrade,
        TrendDirection, VelocityLevel,
    },
    config::{AppConfig, TrendConfig, VelocityConfig},
    pipeline::load_history,
    Changelog, DiffEngine, Endpoint, HistoryAnalyzer, Snapshot, SourceType, StabilityScorer,
    VelocityCalculator,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::path::{Path, PathBuf};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap() + Duration::days(offset)
}

/// A release that adds `added` endpoints and removes `removed` ones.
fn release(from: &str, to: &str, added: usize, removed: usize, at: DateTime<Utc>) -> Changelog {
    let mut old = Snapshot::new("orders", from, SourceType::OpenApi);
    let mut new = Snapshot::new("orders", to, SourceType::OpenApi);
    for i in 0..removed {
        old = old.with_endpoint(Endpoint::new("GET", format!("/orders/old-{i}")));
    }
    for i in 0..added {
        new = new.with_endpoint(Endpoint::new("POST", format!("/orders/new-{i}")));
    }
    DiffEngine::new().diff_at(Some(&old), Some(&new), at)
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_history_mixed_documents() {
    let history = load_history(
        &[fixture_path("history/users.json"), fixture_path("history/billing.json")],
        true,
    )
    .expect("history fixtures should load");

    assert_eq!(history.len(), 4);
    let grouped = group_by_api(history);
    assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["billing", "users"]);
    assert_eq!(grouped["users"].len(), 3);
}

#[test]
fn test_fixture_history_report() {
    let history = load_history(&[fixture_path("history/users.json")], true).expect("load");
    let report = HistoryAnalyzer::new().analyze(&history);

    assert_eq!(report.api_name, "users");
    assert_eq!(report.changelog_count, 3);
    assert_eq!(report.velocity.total_changes, 5);
    assert_eq!(report.velocity.total_breaking_changes, 1);
    // 2026-03-01 through 2026-03-29, inclusive
    assert_eq!(report.velocity.days, 29);
    assert!((report.velocity.average_days_between_releases - 14.0).abs() < 1e-9);

    // The only breaking release bumped the major version and deprecated something
    assert!((report.stability.factors.semver_compliance - 100.0).abs() < f64::EPSILON);
    assert!((report.stability.factors.deprecation_management - 100.0).abs() < f64::EPSILON);
    // Recorded risk scores, reordered by timestamp
    assert_eq!(report.risk_trend.scores, vec![0, 47, 0]);
    assert_eq!(report.risk_trend.cumulative_breaking_changes, 1);
}

// ============================================================================
// Velocity
// ============================================================================

#[test]
fn test_velocity_one_change_per_day() {
    let history: Vec<_> = (0..7).map(|i| release("1.0.0", "1.1.0", 1, 0, day(i))).collect();
    let velocity = VelocityCalculator::default().calculate(&history);

    assert_eq!(velocity.days, 7);
    assert!((velocity.changes_per_day - 1.0).abs() < 1e-9);
    assert!((velocity.changes_per_week - 7.0).abs() < 1e-9);
    assert!((velocity.changes_per_month - 30.0).abs() < 1e-9);
    assert_eq!(velocity.level, VelocityLevel::Moderate);
}

#[test]
fn test_velocity_acceleration() {
    let counts = [1, 1, 4, 6];
    let history: Vec<_> = counts
        .iter()
        .enumerate()
        .map(|(i, n)| release("1.0.0", "1.1.0", *n, 0, day(i as i64 * 7)))
        .collect();

    let velocity = VelocityCalculator::new(VelocityConfig::default()).calculate(&history);
    assert!(velocity.accelerating);
    assert!((velocity.acceleration_rate - 4.0).abs() < 1e-9);
    assert_eq!(velocity.peak_changes_in_release, 6);
}

#[test]
fn test_velocity_empty_history() {
    let velocity = VelocityCalculator::default().calculate(&[]);
    assert_eq!(velocity.total_changes, 0);
    assert_eq!(velocity.level, VelocityLevel::default());
}

// ============================================================================
// Stability
// ============================================================================

#[test]
fn test_empty_history_is_perfectly_stable() {
    let score = StabilityScorer::default().score(&[]);
    assert_eq!(score.overall_score, 100);
    assert_eq!(score.grade, StabilityGrade::A);
    assert!(score.recommendations.is_empty());
}

#[test]
fn test_breaking_minor_releases_lose_semver_compliance() {
    let history = vec![
        release("1.0.0", "1.1.0", 1, 1, day(0)),
        release("1.1.0", "1.2.0", 1, 1, day(3)),
    ];
    let score = StabilityScorer::default().score(&history);

    assert!(score.factors.semver_compliance.abs() < f64::EPSILON);
    assert!(score.factors.time_between_breaking < 10.0);
    assert!(score.overall_score < 50);
    assert_eq!(score.recommendations[0].priority, 1);
}

#[test]
fn test_malformed_versions_are_not_compliant() {
    let history = vec![release("one", "two", 0, 1, day(0))];
    let score = StabilityScorer::default().score(&history);
    assert!(score.factors.semver_compliance.abs() < f64::EPSILON);
}

#[test]
fn test_unsorted_history_matches_sorted() {
    let sorted = vec![
        release("1.0.0", "2.0.0", 0, 1, day(0)),
        release("2.0.0", "2.1.0", 2, 0, day(30)),
        release("2.1.0", "3.0.0", 0, 2, day(200)),
    ];
    let mut shuffled = sorted.clone();
    shuffled.swap(0, 2);

    let scorer = StabilityScorer::default();
    assert_eq!(scorer.score(&sorted), scorer.score(&shuffled));

    let analyzer = HistoryAnalyzer::new();
    assert_eq!(
        analyzer.analyze(&sorted).velocity,
        analyzer.analyze(&shuffled).velocity
    );
}

// ============================================================================
// Trends
// ============================================================================

#[test]
fn test_risk_trend_degrading() {
    let history = vec![
        release("1.0.0", "1.1.0", 3, 0, day(0)),
        release("1.1.0", "2.0.0", 1, 1, day(10)),
        release("2.0.0", "3.0.0", 0, 3, day(20)),
    ];
    let trend = analyze_risk_trend(&history, &TrendConfig::default());

    assert_eq!(trend.scores.len(), 3);
    assert!(trend.scores[0] < trend.scores[2]);
    assert_eq!(trend.summary.direction, TrendDirection::Degrading);
    assert_eq!(trend.cumulative_breaking_changes, 4);
}

#[test]
fn test_short_history_trend_is_stable() {
    let history = vec![
        release("1.0.0", "1.1.0", 1, 0, day(0)),
        release("1.1.0", "2.0.0", 0, 3, day(1)),
    ];
    let trend = analyze_risk_trend(&history, &TrendConfig::default());
    assert_eq!(trend.summary.direction, TrendDirection::Stable);
}

#[test]
fn test_complexity_trend_rising_is_degrading() {
    let snapshots: Vec<_> = (1..=4)
        .map(|n| {
            (0..n * 10).fold(
                Snapshot::new("orders", format!("{n}.0.0"), SourceType::OpenApi),
                |s, i| s.with_endpoint(Endpoint::new("GET", format!("/orders/{i}"))),
            )
        })
        .collect();

    let trend = analyze_complexity_trend(&snapshots, &TrendConfig::default());
    assert_eq!(trend.points.len(), 4);
    assert_eq!(trend.summary.direction, TrendDirection::Degrading);
}

// ============================================================================
// Multiple APIs
// ============================================================================

#[test]
fn test_analyze_many_keys_by_api() {
    let history = load_history(
        &[fixture_path("history/users.json"), fixture_path("history/billing.json")],
        true,
    )
    .expect("load");
    let analyzer = HistoryAnalyzer::from_config(&AppConfig::default());
    let reports = analyzer.analyze_many(&group_by_api(history));

    assert_eq!(reports.len(), 2);
    assert_eq!(reports["billing"].changelog_count, 1);
    assert_eq!(reports["billing"].api_name, "billing");
    assert_eq!(reports["users"].stability.changelogs_analyzed, 3);
}
