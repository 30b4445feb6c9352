//! Configuration module for api-changelog.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use api_changelog::config::{AppConfig, ConfigPreset};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .severity_override(RuleKind::ResponseRemoved, Severity::Breaking)
//!     .fail_on_breaking(true)
//!     .build();
//!
//! // Load from file
//! use api_changelog::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None)?;
//! ```
//!
//! # Configuration File
//!
//! Place a `.api-changelog.yaml` file in your project root or
//! `~/.config/api-changelog/`:
//!
//! ```yaml
//! diff:
//!   severity_overrides:
//!     response-removed: BREAKING
//! behavior:
//!   fail_on_breaking: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::{ConfigPreset, STRICT_BREAKING_RULES};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, OutputConfig, OutputFormat,
    StabilityWeights, TrendConfig, VelocityConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.api-changelog.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_names_sections() {
        let schema = generate_json_schema();
        assert!(schema.contains("severity_overrides"));
        assert!(schema.contains("slope_threshold"));
        assert!(schema.contains("fail_on_breaking"));
    }
}
