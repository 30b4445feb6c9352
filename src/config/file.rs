//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, OutputFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".api-changelog.yaml",
    ".api-changelog.yml",
    "api-changelog.yaml",
    "api-changelog.yml",
];

/// Name of the per-user config directory.
const CONFIG_DIR_NAME: &str = "api-changelog";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/api-changelog/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    let candidates = [
        cwd.clone(),
        cwd.as_deref().and_then(find_git_root),
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME)),
        dirs::home_dir(),
    ];

    candidates
        .iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from an explicit or discovered file, or return default.
///
/// An explicit path must exist and parse; its error is returned. A
/// discovered file that fails to load is skipped with a warning.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        let config = load_config_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    ))
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults are taken from `other`, so
    /// CLI args can be layered over file config. A value equal to its default
    /// cannot be told apart from an unset one; callers with explicit values
    /// (such as `--output json`) apply them after merging.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Diff config
        for (rule, severity) in &other.diff.severity_overrides {
            self.diff.severity_overrides.insert(*rule, *severity);
        }
        if !other.diff.detect_renames {
            self.diff.detect_renames = false;
        }
        if other.diff.rename_similarity != defaults.diff.rename_similarity {
            self.diff.rename_similarity = other.diff.rename_similarity;
        }

        // Analytics config
        if other.stability != defaults.stability {
            self.stability = other.stability.clone();
        }
        if other.velocity != defaults.velocity {
            self.velocity = other.velocity.clone();
        }
        if other.trend != defaults.trend {
            self.trend = other.trend;
        }

        // Output config - only override if explicitly set
        if other.output.format != OutputFormat::Json {
            self.output.format = other.output.format;
        }
        if !other.output.pretty {
            self.output.pretty = false;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }

        // Behavior config (booleans - if set to true, override)
        if other.behavior.fail_on_breaking {
            self.behavior.fail_on_breaking = true;
        }
        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Apply output options given explicitly on the command line.
    ///
    /// Runs after [`AppConfig::merge`], so an explicit value wins even when
    /// it equals the default.
    pub fn apply_output_overrides(
        &mut self,
        format: Option<OutputFormat>,
        pretty: Option<bool>,
        file: Option<PathBuf>,
    ) {
        if let Some(format) = format {
            self.output.format = format;
        }
        if let Some(pretty) = pretty {
            self.output.pretty = pretty;
        }
        if file.is_some() {
            self.output.file = file;
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(cli_overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# api-changelog configuration
# Place this file at .api-changelog.yaml in your project root or ~/.config/api-changelog/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::RuleKind;
    use crate::model::Severity;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".api-changelog.yaml");
        std::fs::write(&config_path, "behavior:\n  fail_on_breaking: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_find_git_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("specs").join("v2");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_git_root(&nested), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
diff:
  severity_overrides:
    response-removed: BREAKING
  detect_renames: false
trend:
  slope_threshold: 2.5
behavior:
  fail_on_breaking: true
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(
            config.diff.severity_overrides.get(&RuleKind::ResponseRemoved),
            Some(&Severity::Breaking)
        );
        assert!(!config.diff.detect_renames);
        assert!((config.trend.slope_threshold - 2.5).abs() < f64::EPSILON);
        assert!(config.behavior.fail_on_breaking);
        // untouched sections keep their defaults
        assert_eq!(config.stability, AppConfig::default().stability);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "diff: [not, a, map]\n").unwrap();

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::default();
        base.diff
            .severity_overrides
            .insert(RuleKind::ParameterDefaultChanged, Severity::Warning);

        let override_config = AppConfig::builder()
            .severity_override(RuleKind::ResponseRemoved, Severity::Breaking)
            .output_format(OutputFormat::Yaml)
            .fail_on_change(true)
            .build();

        base.merge(&override_config);

        assert_eq!(base.diff.severity_overrides.len(), 2);
        assert_eq!(base.output.format, OutputFormat::Yaml);
        assert!(base.behavior.fail_on_change);
        assert!(!base.behavior.fail_on_breaking);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("diff:"));
        assert!(example.contains("severity_overrides"));
        let parsed: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_load_or_default_explicit_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("absent.yaml");
        let result = load_or_default(Some(&missing));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_explicit_broken_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(
            &config_path,
            "diff:\n  severity_overrides:\n    no-such-rule: BREAKING\n\
             behavior:\n  fail_on_breaking: true\n",
        )
        .unwrap();

        let result = load_or_default(Some(&config_path));
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("gate.yaml");
        std::fs::write(&config_path, "behavior:\n  fail_on_breaking: true\n").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path)).unwrap();
        assert!(config.behavior.fail_on_breaking);
        assert_eq!(loaded_from, Some(config_path));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "behavior:\n  quiet: true\n").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
