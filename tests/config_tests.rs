//! Configuration loading, presets, merging and validation.

use api_changelog::{
    config::{
        load_config_file, load_or_default, ConfigFileError, OutputFormat, STRICT_BREAKING_RULES,
    },
    AppConfig, ConfigPreset, RuleKind, Severity, Validatable,
};
use std::fs;

#[test]
fn test_load_yaml_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(".api-changelog.yaml");
    fs::write(
        &path,
        r"
diff:
  severity_overrides:
    response-removed: BREAKING
    endpoint-deprecated: INFO
  detect_renames: false
stability:
  breaking_ratio: 0.25
  time_between_breaking: 0.25
  deprecation_management: 0.25
  semver_compliance: 0.25
output:
  format: yaml
behavior:
  fail_on_breaking: true
",
    )
    .expect("write config");

    let config = load_config_file(&path).expect("config should parse");
    assert_eq!(
        config.diff.severity_overrides.get(&RuleKind::ResponseRemoved),
        Some(&Severity::Breaking)
    );
    assert_eq!(
        config.diff.severity_overrides.get(&RuleKind::EndpointDeprecated),
        Some(&Severity::Info)
    );
    assert!(!config.diff.detect_renames);
    assert_eq!(config.output.format, OutputFormat::Yaml);
    assert!(config.behavior.fail_on_breaking);
    assert!(config.is_valid());
}

#[test]
fn test_unknown_rule_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "diff:\n  severity_overrides:\n    no-such-rule: BREAKING\n").expect("write");

    assert!(load_config_file(&path).is_err());
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.yaml");
    assert!(matches!(
        load_config_file(&missing),
        Err(ConfigFileError::NotFound(path)) if path == missing
    ));
}

#[test]
fn test_explicit_broken_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gate.yaml");
    fs::write(
        &path,
        "diff:\n  severity_overrides:\n    no-such-rule: BREAKING\n\
         behavior:\n  fail_on_breaking: true\n",
    )
    .expect("write");

    let err = load_or_default(Some(&path)).expect_err("broken explicit config must not load");
    assert!(matches!(err, ConfigFileError::Parse(_)));

    let message = api_changelog::ChangelogError::from(err).to_string();
    assert!(message.starts_with("Invalid configuration"), "{message}");
}

#[test]
fn test_explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.yaml");
    assert!(matches!(
        load_or_default(Some(&missing)),
        Err(ConfigFileError::NotFound(path)) if path == missing
    ));
}

#[test]
fn test_invalid_weights_reported() {
    let mut config = AppConfig::default();
    config.stability.breaking_ratio = -0.5;
    config.velocity.min_releases_for_acceleration = 1;

    let errors = config.validate();
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"stability.breaking_ratio"));
    assert!(fields.contains(&"velocity.min_releases_for_acceleration"));
}

#[test]
fn test_presets_are_valid() {
    for preset in ConfigPreset::all() {
        let config = AppConfig::from_preset(*preset);
        assert!(config.is_valid(), "{} preset should validate", preset.name());
        assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
    }
}

#[test]
fn test_strict_preset_overrides() {
    let config = AppConfig::from_preset(ConfigPreset::Strict);
    for rule in STRICT_BREAKING_RULES {
        assert_eq!(config.diff.severity_overrides.get(&rule), Some(&Severity::Breaking));
    }
    assert!(config.behavior.fail_on_breaking);
}

#[test]
fn test_cli_layer_wins_over_file_layer() {
    let mut config = AppConfig::from_preset(ConfigPreset::Strict);
    let file = AppConfig::builder()
        .severity_override(RuleKind::FieldMadeNullable, Severity::Warning)
        .output_format(OutputFormat::Yaml)
        .build();
    config.merge(&file);

    let cli = AppConfig::builder().detect_renames(false).quiet(true).build();
    config.merge(&cli);

    assert_eq!(
        config.diff.severity_overrides.get(&RuleKind::FieldMadeNullable),
        Some(&Severity::Warning)
    );
    assert_eq!(
        config.diff.severity_overrides.get(&RuleKind::ParameterDefaultChanged),
        Some(&Severity::Breaking)
    );
    assert_eq!(config.output.format, OutputFormat::Yaml);
    assert!(!config.diff.detect_renames);
    assert!(config.behavior.quiet);
    assert!(config.behavior.fail_on_breaking);

    // Explicit output flags beat the file even when they name the default
    config.apply_output_overrides(Some(OutputFormat::Json), None, None);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_output_overrides_only_touch_given_options() {
    let mut config = AppConfig::default();
    let file = AppConfig::builder()
        .output_format(OutputFormat::Yaml)
        .output_file(Some("report.yaml".into()))
        .build();
    config.merge(&file);

    config.apply_output_overrides(None, Some(false), None);
    assert_eq!(config.output.format, OutputFormat::Yaml);
    assert!(!config.output.pretty);
    assert_eq!(config.output.file, Some("report.yaml".into()));

    config.apply_output_overrides(Some(OutputFormat::Json), Some(true), None);
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.output.pretty);
}

#[test]
fn test_example_config_round_trips() {
    let example = api_changelog::config::generate_example_config();
    let parsed: AppConfig = serde_yaml::from_str(&example).expect("example should parse");
    assert_eq!(parsed, AppConfig::default());
}
