//! Changelog data structures produced by the diff engine.

use crate::diff::RuleKind;
use crate::utils::content_hash;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lowest impact score a breaking change may carry.
pub const MIN_BREAKING_IMPACT: u8 = 40;

/// Kind of change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Deprecated,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Deprecated => "deprecated",
        };
        write!(f, "{s}")
    }
}

/// Part of the API surface a change touches.
///
/// REST-shaped sources use the endpoint-level categories, schema-graph sources
/// use `Type`/`Field`/`EnumValue`/`UnionMember`. New categories may be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ChangeCategory {
    Endpoint,
    Parameter,
    RequestBody,
    Response,
    Type,
    Field,
    EnumValue,
    UnionMember,
}

impl ChangeCategory {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Endpoint => "Endpoint",
            Self::Parameter => "Parameter",
            Self::RequestBody => "Request Body",
            Self::Response => "Response",
            Self::Type => "Type",
            Self::Field => "Field",
            Self::EnumValue => "Enum Value",
            Self::UnionMember => "Union Member",
        }
    }
}

/// Change severity, ordered most severe first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Requires consumer code changes
    Breaking,
    /// May break consumers depending on usage
    Dangerous,
    /// Consumers should take note
    Warning,
    /// Safe, additive or cosmetic
    Info,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Self; 4] = [Self::Breaking, Self::Dangerous, Self::Warning, Self::Info];

    /// Numeric rank for sorting (0 = most severe).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Breaking => 0,
            Self::Dangerous => 1,
            Self::Warning => 2,
            Self::Info => 3,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breaking => "breaking",
            Self::Dangerous => "dangerous",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Parse from a label. Returns `None` for unrecognized values.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breaking" => Some(Self::Breaking),
            "dangerous" => Some(Self::Dangerous),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single typed, severity-tagged difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// Stable identifier derived from the change content
    pub id: String,
    pub change_type: ChangeType,
    pub category: ChangeCategory,
    pub severity: Severity,
    /// Locator into the snapshot (`GET /users/{id}.parameters.query.limit`)
    pub path: String,
    pub description: String,
    /// Classification rule that produced this change
    pub rule: RuleKind,
}

impl Change {
    /// Create a change; type and category follow from the rule.
    pub fn new(
        rule: RuleKind,
        severity: Severity,
        path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let description = description.into();
        let change_type = rule.change_type();
        let category = rule.category();
        let id = change_id(change_type, category, &path, &description);
        Self {
            id,
            change_type,
            category,
            severity,
            path,
            description,
            rule,
        }
    }

    #[must_use]
    pub fn is_breaking(&self) -> bool {
        self.severity == Severity::Breaking
    }

    /// Whether the change announces or mentions a deprecation.
    #[must_use]
    pub fn mentions_deprecation(&self) -> bool {
        self.change_type == ChangeType::Deprecated
            || self.description.to_lowercase().contains("deprecat")
    }
}

fn change_id(
    change_type: ChangeType,
    category: ChangeCategory,
    path: &str,
    description: &str,
) -> String {
    let key = format!("{change_type:?}|{category:?}|{path}|{description}");
    format!("{:016x}", content_hash(key.as_bytes()))
}

/// A change with `severity == Breaking`, plus impact and migration guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChange {
    #[serde(flatten)]
    pub change: Change,
    /// Estimated consumer impact (40-100)
    pub impact_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_suggestion: Option<String>,
}

impl BreakingChange {
    /// Wrap a change. Returns `None` unless the change is breaking.
    #[must_use]
    pub fn new(
        change: Change,
        impact_score: u8,
        migration_suggestion: Option<String>,
    ) -> Option<Self> {
        if !change.is_breaking() {
            return None;
        }
        Some(Self {
            change,
            impact_score: impact_score.clamp(MIN_BREAKING_IMPACT, 100),
            migration_suggestion,
        })
    }
}

/// Aggregate risk level of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a 0-100 score to a level.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => Self::Critical,
            50..=74 => Self::High,
            25..=49 => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimum semantic-version bump implied by a changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemverBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for SemverBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        };
        write!(f, "{s}")
    }
}

/// Risk of a single comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// 0-100
    pub overall_score: u8,
    pub level: RiskLevel,
    pub breaking_changes_count: usize,
    pub total_changes_count: usize,
    pub semver_recommendation: SemverBump,
    pub recommendation: String,
    /// Counts for every severity, zero-filled
    pub changes_by_severity: BTreeMap<Severity, usize>,
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self {
            overall_score: 0,
            level: RiskLevel::Low,
            breaking_changes_count: 0,
            total_changes_count: 0,
            semver_recommendation: SemverBump::Patch,
            recommendation: String::new(),
            changes_by_severity: Severity::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }
}

/// Structured diff between two snapshots plus its risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct Changelog {
    pub api_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_version: Option<String>,
    /// All changes, most severe first
    #[serde(default)]
    pub changes: Vec<Change>,
    /// Breaking subset of `changes`, same order
    #[serde(default)]
    pub breaking_changes: Vec<BreakingChange>,
    #[serde(default)]
    pub risk: RiskAssessment,
    pub generated_at: DateTime<Utc>,
}

impl Changelog {
    /// Check the exit-code condition used by CI integrations.
    #[must_use]
    pub fn has_breaking_changes(&self) -> bool {
        !self.breaking_changes.is_empty()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Number of changes with `severity == Breaking`.
    #[must_use]
    pub fn breaking_count(&self) -> usize {
        self.changes.iter().filter(|c| c.is_breaking()).count()
    }

    /// Count changes per severity; every severity is present.
    #[must_use]
    pub fn changes_by_severity(&self) -> BTreeMap<Severity, usize> {
        count_by_severity(&self.changes)
    }

    /// Changes of a given category.
    pub fn changes_in(&self, category: ChangeCategory) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(move |c| c.category == category)
    }

    /// Whether any change announces a deprecation.
    #[must_use]
    pub fn mentions_deprecation(&self) -> bool {
        self.changes.iter().any(Change::mentions_deprecation)
    }
}

/// Zero-filled severity histogram.
#[must_use]
pub fn count_by_severity(changes: &[Change]) -> BTreeMap<Severity, usize> {
    let mut counts: BTreeMap<Severity, usize> = Severity::ALL.iter().map(|s| (*s, 0)).collect();
    for change in changes {
        *counts.entry(change.severity).or_insert(0) += 1;
    }
    counts
}
