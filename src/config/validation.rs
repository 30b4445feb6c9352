//! Configuration validation for api-changelog.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::*;

/// Tolerance for the stability weight sum.
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.stability.validate());
        errors.extend(self.velocity.validate());
        errors.extend(self.trend.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(0.0..=1.0).contains(&self.rename_similarity) {
            errors.push(ConfigError::new(
                "diff.rename_similarity",
                format!(
                    "Similarity must be between 0.0 and 1.0, got {}",
                    self.rename_similarity
                ),
            ));
        }
        errors
    }
}

impl Validatable for StabilityWeights {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let named = [
            ("stability.breaking_ratio", self.breaking_ratio),
            ("stability.time_between_breaking", self.time_between_breaking),
            ("stability.deprecation_management", self.deprecation_management),
            ("stability.semver_compliance", self.semver_compliance),
        ];
        for (field, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                errors.push(ConfigError::new(
                    field,
                    format!("Weight must be a non-negative number, got {weight}"),
                ));
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            errors.push(ConfigError::new(
                "stability",
                format!("Weights must sum to 1.0, got {total:.3}"),
            ));
        }
        errors
    }
}

impl Validatable for VelocityConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.acceleration_ratio.is_finite() || self.acceleration_ratio < 1.0 {
            errors.push(ConfigError::new(
                "velocity.acceleration_ratio",
                format!("Ratio must be at least 1.0, got {}", self.acceleration_ratio),
            ));
        }
        if self.min_releases_for_acceleration < 2 {
            errors.push(ConfigError::new(
                "velocity.min_releases_for_acceleration",
                "At least 2 changelogs are needed to compare halves of a history",
            ));
        }
        errors
    }
}

impl Validatable for TrendConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.slope_threshold.is_finite() || self.slope_threshold < 0.0 {
            errors.push(ConfigError::new(
                "trend.slope_threshold",
                format!("Threshold must be non-negative, got {}", self.slope_threshold),
            ));
        }
        if !self.significant_change_ratio.is_finite() || self.significant_change_ratio < 0.0 {
            errors.push(ConfigError::new(
                "trend.significant_change_ratio",
                format!(
                    "Ratio must be non-negative, got {}",
                    self.significant_change_ratio
                ),
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // All boolean flags are always valid
        Vec::new()
    }
}
