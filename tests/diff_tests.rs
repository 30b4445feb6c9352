//! Integration tests for the diff engine
//!
//! These tests load canonical snapshots from fixtures and verify the
//! classification, breaking-change derivation and risk assessment end to end.

use api_changelog::{
    config::{AppConfig, ConfigPreset},
    diff::{RenameDetection, RuleKind},
    model::{ChangeCategory, ChangeType, Field, RiskLevel, SemverBump, TypeDefinition, TypeKind},
    pipeline::{load_optional_snapshot, load_snapshot, ABSENT_SNAPSHOT},
    ClassificationRules, DiffEngine, Endpoint, Severity, Snapshot, SourceType,
};
use chrono::{TimeZone, Utc};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn fixture(name: &str) -> Snapshot {
    load_snapshot(&fixture_path(name), true).expect("fixture should load")
}

fn rules_of(changelog: &api_changelog::Changelog) -> Vec<RuleKind> {
    changelog.changes.iter().map(|c| c.rule).collect()
}

// ============================================================================
// REST Snapshots
// ============================================================================

mod rest_tests {
    use super::*;

    #[test]
    fn test_rest_fixture_classification() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );

        assert_eq!(changelog.api_name, "users");
        assert_eq!(changelog.from_version.as_deref(), Some("1.4.0"));
        assert_eq!(changelog.to_version.as_deref(), Some("2.0.0"));

        assert_eq!(
            rules_of(&changelog),
            vec![
                RuleKind::EndpointRemoved,
                RuleKind::ParameterAddedRequired,
                RuleKind::RequestBodyMadeRequired,
                RuleKind::ParameterDefaultChanged,
                RuleKind::EndpointDeprecated,
                RuleKind::ResponseSchemaChanged,
                RuleKind::ResponseRemoved,
                RuleKind::EndpointAdded,
                RuleKind::RequestBodyContentTypeAdded,
            ]
        );
    }

    #[test]
    fn test_rest_fixture_paths() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );
        let paths: Vec<_> = changelog.changes.iter().map(|c| c.path.as_str()).collect();

        assert!(paths.contains(&"GET /legacy/report"));
        assert!(paths.contains(&"GET /users.parameters.header.tenant"));
        assert!(paths.contains(&"GET /users.parameters.query.limit"));
        assert!(paths.contains(&"POST /users.requestBody"));
        assert!(paths.contains(&"POST /users.requestBody.application/xml"));
        assert!(paths.contains(&"GET /users/{id}.responses.404"));
        assert!(paths.contains(&"DELETE /users/{id}"));
    }

    #[test]
    fn test_rest_fixture_severity_counts() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );
        let counts = &changelog.risk.changes_by_severity;

        assert_eq!(counts[&Severity::Breaking], 3);
        assert_eq!(counts[&Severity::Dangerous], 1);
        assert_eq!(counts[&Severity::Warning], 3);
        assert_eq!(counts[&Severity::Info], 2);
        assert_eq!(counts.values().sum::<usize>(), changelog.changes.len());
    }

    #[test]
    fn test_rest_fixture_risk() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );

        // 3 breaking of 9: 3*10 + mean impact (90+70+70)/3*0.3 + 33.3%*0.2
        assert_eq!(changelog.risk.overall_score, 60);
        assert_eq!(changelog.risk.level, RiskLevel::High);
        assert_eq!(changelog.risk.semver_recommendation, SemverBump::Major);
        assert_eq!(changelog.risk.breaking_changes_count, 3);
        assert_eq!(changelog.risk.total_changes_count, 9);
    }

    #[test]
    fn test_rest_fixture_rename_migration() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );
        let removed = changelog
            .breaking_changes
            .iter()
            .find(|b| b.change.rule == RuleKind::EndpointRemoved)
            .expect("removal should be breaking");

        assert_eq!(removed.impact_score, 90);
        let migration = removed.migration_suggestion.as_deref().unwrap_or_default();
        assert!(migration.contains("GET /legacy/reports"), "got: {migration}");
    }

    #[test]
    fn test_rename_detection_disabled_uses_generic_hint() {
        let engine = DiffEngine::new().with_rename_detection(RenameDetection::disabled());
        let changelog = engine.diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );
        let removed = &changelog.breaking_changes[0];

        assert_eq!(removed.change.rule, RuleKind::EndpointRemoved);
        assert_eq!(
            removed.migration_suggestion.as_deref(),
            Some(RuleKind::EndpointRemoved.migration_hint())
        );
    }

    #[test]
    fn test_breaking_changes_are_subset_of_changes() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );

        assert!(changelog
            .breaking_changes
            .iter()
            .all(|b| b.change.is_breaking() && changelog.changes.contains(&b.change)));
        assert_eq!(changelog.breaking_count(), changelog.risk.breaking_changes_count);
    }

    #[test]
    fn test_identical_fixture_has_no_changes() {
        let v1 = fixture("rest_v1.json");
        let changelog = DiffEngine::new().diff(Some(&v1), Some(&v1));

        assert!(!changelog.has_changes());
        assert_eq!(changelog.risk.overall_score, 0);
        assert_eq!(changelog.risk.level, RiskLevel::Low);
        assert_eq!(changelog.risk.semver_recommendation, SemverBump::Patch);
    }
}

// ============================================================================
// Schema Graphs
// ============================================================================

mod schema_tests {
    use super::*;

    #[test]
    fn test_graphql_fixture_classification() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("graphql_v1.json")),
            Some(&fixture("graphql_v2.json")),
        );
        let breaking: Vec<_> = changelog
            .changes
            .iter()
            .filter(|c| c.is_breaking())
            .map(|c| c.path.as_str())
            .collect();

        assert_eq!(
            breaking,
            vec!["User.email", "UserFilter.tenant", "Role.GUEST", "SearchResult.Team"]
        );
        assert_eq!(changelog.changes.len(), 8);
        assert_eq!(changelog.risk.semver_recommendation, SemverBump::Major);
    }

    #[test]
    fn test_graphql_nullability_is_dangerous() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("graphql_v1.json")),
            Some(&fixture("graphql_v2.json")),
        );
        let nullable = changelog
            .changes
            .iter()
            .find(|c| c.path == "User.name")
            .expect("nullability change should be reported");

        assert_eq!(nullable.rule, RuleKind::FieldMadeNullable);
        assert_eq!(nullable.severity, Severity::Dangerous);
        assert_eq!(nullable.category, ChangeCategory::Field);
    }

    #[test]
    fn test_graphql_deprecation_and_additions() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("graphql_v1.json")),
            Some(&fixture("graphql_v2.json")),
        );
        let info_paths: Vec<_> = changelog
            .changes
            .iter()
            .filter(|c| c.severity == Severity::Info)
            .map(|c| c.path.as_str())
            .collect();

        assert_eq!(info_paths, vec!["User.avatarUrl", "Role.OWNER"]);
        assert!(changelog
            .changes
            .iter()
            .any(|c| c.path == "Team" && c.change_type == ChangeType::Deprecated));
    }

    #[test]
    fn test_protobuf_field_number_change() {
        let old = Snapshot::new("orders", "1.0.0", SourceType::Grpc).with_type(
            TypeDefinition::new("Order", TypeKind::Message)
                .with_field(Field::new("id", "string", true).with_number(1))
                .with_field(Field::new("total", "int64", false).with_number(2)),
        );
        let new = Snapshot::new("orders", "1.1.0", SourceType::Grpc).with_type(
            TypeDefinition::new("Order", TypeKind::Message)
                .with_field(Field::new("id", "string", true).with_number(1))
                .with_field(Field::new("total", "int64", false).with_number(3)),
        );

        let changelog = DiffEngine::new().diff(Some(&old), Some(&new));
        assert_eq!(rules_of(&changelog), vec![RuleKind::FieldNumberChanged]);
        assert_eq!(changelog.breaking_changes[0].impact_score, 80);
    }
}

// ============================================================================
// Created and Retired APIs
// ============================================================================

mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_absent_snapshot_marker() {
        let absent = load_optional_snapshot(Path::new(ABSENT_SNAPSHOT), true).expect("marker");
        assert!(absent.is_none());
    }

    #[test]
    fn test_new_api_from_fixture() {
        let v1 = fixture("rest_v1.json");
        let changelog = DiffEngine::new().diff(None, Some(&v1));

        assert_eq!(changelog.changes.len(), v1.endpoints.len());
        assert!(changelog.changes.iter().all(|c| c.rule == RuleKind::EndpointAdded));
        assert_eq!(changelog.from_version, None);
        assert_eq!(changelog.risk.semver_recommendation, SemverBump::Minor);
    }

    #[test]
    fn test_removed_api_from_fixture() {
        let v1 = fixture("graphql_v1.json");
        let changelog = DiffEngine::new().diff(Some(&v1), None);

        assert_eq!(changelog.changes[0].rule, RuleKind::ApiRemoved);
        assert_eq!(
            changelog.changes.len(),
            1 + v1.endpoints.len() + v1.types.len()
        );
        assert_eq!(changelog.breaking_changes.len(), 1);
        assert_eq!(changelog.to_version, None);
    }

    #[test]
    fn test_diff_at_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let old = fixture("rest_v1.json");
        let new = fixture("rest_v2.json");
        let engine = DiffEngine::new();

        let first = engine.diff_at(Some(&old), Some(&new), at);
        let second = engine.diff_at(Some(&old), Some(&new), at);
        assert_eq!(first, second);
        assert_eq!(first.generated_at, at);
    }
}

// ============================================================================
// Severity Policy
// ============================================================================

mod policy_tests {
    use super::*;

    #[test]
    fn test_strict_preset_promotes_dangerous_changes() {
        let config = AppConfig::from_preset(ConfigPreset::Strict);
        let changelog = DiffEngine::from_config(&config.diff).diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );

        assert_eq!(changelog.risk.changes_by_severity[&Severity::Dangerous], 0);
        assert_eq!(changelog.breaking_changes.len(), 4);
    }

    #[test]
    fn test_override_demotes_breaking_change() {
        let rules = ClassificationRules::new()
            .with_override(RuleKind::EndpointRemoved, Severity::Warning);
        let old = Snapshot::new("users", "1.0.0", SourceType::OpenApi)
            .with_endpoint(Endpoint::new("GET", "/users"));
        let new = Snapshot::new("users", "1.0.1", SourceType::OpenApi);

        let changelog = DiffEngine::new().with_rules(rules).diff(Some(&old), Some(&new));
        assert!(!changelog.has_breaking_changes());
        assert_eq!(changelog.changes[0].severity, Severity::Warning);
        assert_eq!(changelog.risk.semver_recommendation, SemverBump::Patch);
    }

    #[test]
    fn test_changelog_serializes_camel_case() {
        let changelog = DiffEngine::new().diff(
            Some(&fixture("rest_v1.json")),
            Some(&fixture("rest_v2.json")),
        );
        let json = serde_json::to_value(&changelog).expect("serialize");

        assert_eq!(json["apiName"], "users");
        assert_eq!(json["risk"]["semverRecommendation"], "MAJOR");
        assert_eq!(json["changes"][0]["changeType"], "REMOVED");
        assert_eq!(json["breakingChanges"][0]["impactScore"], 90);
    }
}
