//! Configuration types for api-changelog operations.
//!
//! Provides structured configuration for diffing, history analytics and output.

use crate::diff::{RuleKind, DEFAULT_RENAME_SIMILARITY};
use crate::model::Severity;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI flags override values loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Diff and classification settings
    pub diff: DiffConfig,
    /// Stability scoring weights
    pub stability: StabilityWeights,
    /// Velocity calculation settings
    pub velocity: VelocityConfig,
    /// Trend classification settings
    pub trend: TrendConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Start from an existing configuration (e.g. one loaded from a file).
    pub const fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Override the severity of one classification rule.
    pub fn severity_override(mut self, rule: RuleKind, severity: Severity) -> Self {
        self.config.diff.severity_overrides.insert(rule, severity);
        self
    }

    /// Enable or disable rename detection.
    pub const fn detect_renames(mut self, enabled: bool) -> Self {
        self.config.diff.detect_renames = enabled;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Enable fail-on-breaking mode.
    pub const fn fail_on_breaking(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_breaking = fail;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Set the slope threshold used for trend classification.
    pub const fn slope_threshold(mut self, threshold: f64) -> Self {
        self.config.trend.slope_threshold = threshold;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Diff and classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffConfig {
    /// Severity overrides keyed by rule id (e.g. `response-removed: BREAKING`)
    pub severity_overrides: BTreeMap<RuleKind, Severity>,
    /// Suggest a migration target when a removed endpoint looks renamed
    pub detect_renames: bool,
    /// Minimum path similarity for rename detection (0.0-1.0)
    #[schemars(range(min = 0.0, max = 1.0))]
    pub rename_similarity: f64,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            severity_overrides: BTreeMap::new(),
            detect_renames: true,
            rename_similarity: DEFAULT_RENAME_SIMILARITY,
        }
    }
}

/// Weights of the stability factors.
///
/// Weights are renormalized before use, so they only need to be proportional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StabilityWeights {
    #[schemars(range(min = 0.0, max = 1.0))]
    pub breaking_ratio: f64,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub time_between_breaking: f64,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub deprecation_management: f64,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub semver_compliance: f64,
}

impl Default for StabilityWeights {
    fn default() -> Self {
        Self {
            breaking_ratio: 0.40,
            time_between_breaking: 0.20,
            deprecation_management: 0.20,
            semver_compliance: 0.20,
        }
    }
}

impl StabilityWeights {
    /// Return weights as an array for iteration
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [
            self.breaking_ratio,
            self.time_between_breaking,
            self.deprecation_management,
            self.semver_compliance,
        ]
    }

    /// Weights scaled to sum to 1.0.
    ///
    /// Negative weights count as zero; if nothing positive remains the
    /// default weights are used.
    #[must_use]
    pub fn renormalize(&self) -> [f64; 4] {
        let raw = self.as_array().map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 });
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Self::default().renormalize();
        }
        raw.map(|w| w / total)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

/// Velocity calculation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VelocityConfig {
    /// Second-half/first-half change ratio above which a history is accelerating
    #[schemars(range(min = 1.0))]
    pub acceleration_ratio: f64,
    /// Minimum number of changelogs before acceleration is evaluated
    #[schemars(range(min = 2))]
    pub min_releases_for_acceleration: usize,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            acceleration_ratio: 1.2,
            min_releases_for_acceleration: 4,
        }
    }
}

/// Trend classification configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TrendConfig {
    /// Absolute slope (points per release) below which a series is flat
    #[schemars(range(min = 0.0))]
    pub slope_threshold: f64,
    /// Relative change of the latest value that counts as significant
    #[schemars(range(min = 0.0))]
    pub significant_change_ratio: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            slope_threshold: 1.0,
            significant_change_ratio: 0.25,
        }
    }
}

/// Structured output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON document
    #[default]
    Json,
    /// YAML document
    #[value(alias = "yml")]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            file: None,
        }
    }
}

/// Behavior flags for diff operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 2 if breaking changes are detected
    pub fail_on_breaking: bool,
    /// Exit with code 1 if any changes detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
