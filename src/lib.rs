//! **API diff, breaking-change classification and history analytics.**
//!
//! `api-changelog` compares two canonical snapshots of an API specification
//! (OpenAPI, AsyncAPI, GraphQL or gRPC/Protobuf, normalized by an upstream
//! parser) and produces a structured [`Changelog`]: every difference typed,
//! categorized and tagged with a severity, the breaking subset with impact
//! scores and migration hints, and a risk assessment with a semver
//! recommendation.
//!
//! Over a history of changelogs it scores stability, change velocity and
//! risk trends; over snapshots it scores structural complexity and
//! technical debt.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Snapshot`] (the canonical input) and [`Changelog`] (the
//!   diff output) with their value types.
//! - **[`diff`]**: the [`DiffEngine`] and the [`ClassificationRules`] that map
//!   every detected situation to a severity.
//! - **[`analysis`]**: risk assessment, trend math, the [`StabilityScorer`],
//!   the [`VelocityCalculator`], complexity/debt scoring and the
//!   [`HistoryAnalyzer`] that bundles them.
//! - **[`config`]**: [`AppConfig`] with YAML discovery, presets and
//!   validation.
//! - **[`pipeline`]**: loading documents and writing reports for the CLI.
//!
//! ## Diffing Two Snapshots
//!
//! ```no_run
//! use api_changelog::{DiffEngine, Endpoint, Snapshot, SourceType};
//!
//! let v1 = Snapshot::new("users", "1.0.0", SourceType::OpenApi)
//!     .with_endpoint(Endpoint::new("GET", "/users"))
//!     .with_endpoint(Endpoint::new("GET", "/users/{id}"));
//! let v2 = Snapshot::new("users", "2.0.0", SourceType::OpenApi)
//!     .with_endpoint(Endpoint::new("GET", "/users"))
//!     .with_endpoint(Endpoint::new("POST", "/users"));
//!
//! let changelog = DiffEngine::new().diff(Some(&v1), Some(&v2));
//! for change in &changelog.changes {
//!     println!("[{}] {}: {}", change.severity, change.path, change.description);
//! }
//! if changelog.has_breaking_changes() {
//!     println!("Release needs a {} bump", changelog.risk.semver_recommendation);
//! }
//! ```
//!
//! ## Analyzing a History
//!
//! ```no_run
//! use api_changelog::{Changelog, HistoryAnalyzer};
//!
//! fn report(history: &[Changelog]) {
//!     let report = HistoryAnalyzer::new().analyze(history);
//!     println!(
//!         "stability {} ({}), {:.1} changes/week",
//!         report.stability.overall_score,
//!         report.stability.grade.description(),
//!         report.velocity.changes_per_week,
//!     );
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Counts and scores are bounded; usize/f64/u8 casts are pervasive in scoring math
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{
    assess_risk, HistoryAnalyzer, HistoryReport, StabilityScore, StabilityScorer,
    VelocityCalculator,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use diff::{ClassificationRules, DiffEngine, RuleKind};
pub use error::{ChangelogError, ErrorContext, Result};
pub use model::{
    BreakingChange, Change, ChangeCategory, ChangeType, Changelog, Endpoint, RiskAssessment,
    Severity, Snapshot, SourceType,
};
