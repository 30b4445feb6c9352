//! api-changelog: API diff, breaking-change classification and history analytics
//!
//! Compares canonical snapshots of OpenAPI, AsyncAPI, GraphQL and gRPC
//! specifications and scores how an API evolves over time.

use anyhow::{Context, Result};
use api_changelog::{
    cli::{self, DiffPaths},
    config::{self, AppConfig, ConfigPreset, OutputFormat, Validatable},
    pipeline::exit_codes,
    ChangelogError,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSnapshot Sources:",
        "\n  OpenAPI, AsyncAPI, GraphQL, gRPC/Protobuf (canonical JSON or YAML)",
        "\n\nOutput Formats:",
        "\n  json, yaml"
    )
}

#[derive(Parser)]
#[command(name = "api-changelog")]
#[command(version, long_version = build_long_version())]
#[command(
    about = "API diff, breaking-change classification and history analytics",
    long_about = None
)]
#[command(after_help = "EXIT CODES:
    0  Success (or no failure flag triggered)
    1  Changes detected (--fail-on-change)
    2  Breaking changes detected (--fail-on-breaking)
    3  Error occurred

EXAMPLES:
    # Changelog between two releases
    api-changelog diff v1.json v2.json

    # CI gate
    api-changelog diff v1.json v2.json --preset ci-cd

    # A brand new API
    api-changelog diff none v1.json

    # Stability and velocity over stored changelogs
    api-changelog history changelogs/*.json -o yaml")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "API_CHANGELOG_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration preset (default, strict, ci-cd)
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output options shared by every reporting subcommand
#[derive(clap::Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old snapshot (`none` for a newly created API)
    old: PathBuf,

    /// Path to the new snapshot (`none` for a removed API)
    new: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    /// Exit with code 2 if breaking changes are detected
    #[arg(long)]
    fail_on_breaking: bool,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// Do not suggest rename targets for removed endpoints
    #[arg(long)]
    no_rename_detection: bool,
}

/// Arguments for the `history` subcommand
#[derive(Parser)]
struct HistoryArgs {
    /// Changelog files (each holds one changelog or an array)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `complexity` subcommand
#[derive(Parser)]
struct ComplexityArgs {
    /// Snapshot files, oldest first
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two snapshots and classify every change
    Diff(DiffArgs),

    /// Score stability, velocity and risk trend over changelogs
    History(HistoryArgs),

    /// Score complexity and technical debt of snapshots
    Complexity(ComplexityArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print the discovered config file
    Path,
    /// Generate an example .api-changelog.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let overrides = AppConfig::builder()
                .fail_on_breaking(args.fail_on_breaking)
                .fail_on_change(args.fail_on_change)
                .detect_renames(!args.no_rename_detection);
            let config = effective_config(
                cli.config.as_deref(),
                cli.preset.as_deref(),
                cli.quiet,
                overrides,
                &args.output,
            )?;
            let paths = DiffPaths {
                old: args.old,
                new: args.new,
            };
            cli::run_diff(&paths, &config)
        }

        Commands::History(args) => {
            let config = effective_config(
                cli.config.as_deref(),
                cli.preset.as_deref(),
                cli.quiet,
                AppConfig::builder(),
                &args.output,
            )?;
            cli::run_history(&args.files, &config)
        }

        Commands::Complexity(args) => {
            let config = effective_config(
                cli.config.as_deref(),
                cli.preset.as_deref(),
                cli.quiet,
                AppConfig::builder(),
                &args.output,
            )?;
            cli::run_complexity(&args.files, &config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "api-changelog", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config_action(action, cli.config.as_deref()),
    }
}

/// Layer file config, preset and CLI flags, then validate.
///
/// Precedence: CLI flags > config file > preset > defaults.
fn effective_config(
    config_path: Option<&Path>,
    preset: Option<&str>,
    quiet: bool,
    overrides: config::AppConfigBuilder,
    output: &OutputArgs,
) -> Result<AppConfig> {
    let mut config = match preset {
        Some(name) => {
            let preset = ConfigPreset::from_name(name).with_context(|| {
                let known: Vec<_> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                format!("unknown preset '{name}' (expected one of: {})", known.join(", "))
            })?;
            AppConfig::from_preset(preset)
        }
        None => AppConfig::default(),
    };

    let (file_config, loaded_from) =
        config::load_or_default(config_path).map_err(ChangelogError::from)?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    config.merge(&file_config);

    config.merge(&overrides.quiet(quiet).build());
    config.apply_output_overrides(
        output.output,
        output.compact.then_some(false),
        output.output_file.clone(),
    );

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn run_config_action(action: ConfigAction, explicit: Option<&Path>) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) =
                config::load_or_default(explicit).map_err(ChangelogError::from)?;
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => match config::discover_config_file(explicit) {
            Some(path) => eprintln!("Active config file: {}", path.display()),
            None => eprintln!("No config file found."),
        },
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".api-changelog.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}
