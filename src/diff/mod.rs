//! Diff and classification engine for API snapshots.
//!
//! Two canonical [`Snapshot`](crate::model::Snapshot)s are matched entity by
//! entity and every difference is classified into a typed, severity-tagged
//! [`Change`](crate::model::Change).
//!
//! # Architecture
//!
//! The diff system is built on traits for extensibility:
//!
//! - [`ChangeComputer`](traits::ChangeComputer): Trait for computing one family of changes
//! - Individual change computers in the [`changes`] module
//! - [`ClassificationRules`]: the severity taxonomy, with per-rule overrides
//!
//! # Example
//!
//! ```ignore
//! use api_changelog::diff::DiffEngine;
//!
//! let engine = DiffEngine::new();
//! let changelog = engine.diff(Some(&old_snapshot), Some(&new_snapshot));
//! if changelog.has_breaking_changes() {
//!     std::process::exit(2);
//! }
//! ```

pub mod changes;
mod engine;
mod engine_config;
pub mod matching;
mod rules;
pub mod traits;

pub use engine::DiffEngine;
pub use engine_config::{RenameDetection, DEFAULT_RENAME_SIMILARITY};
pub use matching::{endpoint_identity, EndpointMatches, MatchedEndpoint};
pub use rules::{sort_by_severity, ClassificationRules, RuleKind};
pub use traits::{ChangeComputer, ChangeSet};
