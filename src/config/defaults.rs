//! Default configurations and presets for api-changelog.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, OutputConfig, OutputFormat};
use crate::diff::RuleKind;
use crate::model::Severity;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default classification
    Default,
    /// Strict: every dangerous change is treated as breaking
    Strict,
    /// CI/CD: compact output, fail on breaking changes
    CiCd,
}

/// Rules that `Strict` promotes from dangerous to breaking.
pub const STRICT_BREAKING_RULES: [RuleKind; 5] = [
    RuleKind::ParameterDefaultChanged,
    RuleKind::RequestBodySchemaChanged,
    RuleKind::SuccessResponseRemoved,
    RuleKind::FieldMadeNullable,
    RuleKind::InputFieldDefaultChanged,
];

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" => Some(Self::Strict),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Standard breaking-change classification",
            Self::Strict => "Treats every potentially breaking change as breaking",
            Self::CiCd => "Compact JSON output that fails the build on breaking changes",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    /// Strict preset.
    ///
    /// - Dangerous rules promoted to breaking
    /// - Fail on breaking changes
    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            diff: DiffConfig {
                severity_overrides: STRICT_BREAKING_RULES
                    .iter()
                    .map(|rule| (*rule, Severity::Breaking))
                    .collect(),
                ..DiffConfig::default()
            },
            behavior: BehaviorConfig {
                fail_on_breaking: true,
                ..BehaviorConfig::default()
            },
            ..Self::default()
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - Compact JSON output for machine parsing
    /// - Fail on breaking changes
    /// - Quiet mode to reduce noise
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            output: OutputConfig {
                format: OutputFormat::Json,
                pretty: false,
                file: None,
            },
            behavior: BehaviorConfig {
                fail_on_breaking: true,
                fail_on_change: false,
                quiet: true,
            },
            ..Self::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!(ConfigPreset::Default.name(), "default");
        assert_eq!(ConfigPreset::CiCd.name(), "ci-cd");
        assert_eq!(ConfigPreset::from_name("pipeline"), Some(ConfigPreset::CiCd));
        assert_eq!(ConfigPreset::from_name("STRICT"), Some(ConfigPreset::Strict));
        assert_eq!(ConfigPreset::from_name("invalid"), None);
    }

    #[test]
    fn test_strict_preset() {
        let config = AppConfig::strict_preset();
        assert_eq!(config.diff.severity_overrides.len(), STRICT_BREAKING_RULES.len());
        assert!(config
            .diff
            .severity_overrides
            .keys()
            .all(|rule| rule.default_severity() == Severity::Dangerous));
        assert!(config.behavior.fail_on_breaking);
    }

    #[test]
    fn test_ci_cd_preset() {
        let config = AppConfig::ci_cd_preset();
        assert!(config.behavior.fail_on_breaking);
        assert!(config.behavior.quiet);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_all_presets() {
        assert_eq!(ConfigPreset::all().len(), 3);
        assert_eq!(AppConfig::from_preset(ConfigPreset::Default), AppConfig::default());
    }
}
