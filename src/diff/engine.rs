//! Diff engine implementation.

use super::changes::{
    EndpointChangeComputer, ParameterChangeComputer, RequestBodyChangeComputer,
    ResponseChangeComputer, SchemaChangeComputer,
};
use super::engine_config::RenameDetection;
use super::matching::index_endpoints;
use super::matching::EndpointMatches;
use super::rules::{sort_by_severity, ClassificationRules, RuleKind};
use super::traits::{ChangeComputer, ChangeSet};
use crate::analysis::assess_risk;
use crate::config::DiffConfig;
use crate::model::{BreakingChange, Changelog, Snapshot};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Diff engine comparing two API snapshots.
///
/// The engine holds configuration only; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    rules: ClassificationRules,
    rename: RenameDetection,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from the `diff` configuration section.
    #[must_use]
    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            rules: ClassificationRules::from_overrides(config.severity_overrides.clone()),
            rename: RenameDetection {
                enabled: config.detect_renames,
                min_similarity: config.rename_similarity,
            },
        }
    }

    /// Use custom classification rules
    #[must_use]
    pub fn with_rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Configure rename detection
    #[must_use]
    pub fn with_rename_detection(mut self, rename: RenameDetection) -> Self {
        self.rename = rename;
        self
    }

    #[must_use]
    pub const fn rules(&self) -> &ClassificationRules {
        &self.rules
    }

    /// Compare two snapshots, stamping the changelog with the current time.
    pub fn diff(&self, old: Option<&Snapshot>, new: Option<&Snapshot>) -> Changelog {
        self.diff_at(old, new, Utc::now())
    }

    /// Compare two snapshots with an explicit generation timestamp.
    ///
    /// An absent `old` describes a newly created API; an absent `new` an API
    /// that was removed entirely.
    pub fn diff_at(
        &self,
        old: Option<&Snapshot>,
        new: Option<&Snapshot>,
        generated_at: DateTime<Utc>,
    ) -> Changelog {
        let changes = match (old, new) {
            (None, None) => ChangeSet::new(),
            (None, Some(new)) => self.created(new),
            (Some(old), None) => self.retired(old),
            (Some(old), Some(new)) => self.compare(old, new),
        };

        let api_name = new
            .or(old)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        self.assemble(
            api_name,
            old.and_then(|s| non_empty(&s.version)),
            new.and_then(|s| non_empty(&s.version)),
            changes,
            generated_at,
        )
    }

    fn compare(&self, old: &Snapshot, new: &Snapshot) -> ChangeSet {
        // Quick check: identical content fingerprints mean identical surfaces
        let fingerprints = (old.content_hash(), new.content_hash());
        if matches!(fingerprints, (Some(a), Some(b)) if a == b) {
            debug!("Snapshots share a content fingerprint; skipping comparison");
            return ChangeSet::new();
        }

        let matches = EndpointMatches::build(old, new);
        debug!("{} endpoints matched by identity", matches.matched_count());
        self.compute_all_changes(old, new, &matches)
    }

    /// Compute all changes using the modular change computers.
    fn compute_all_changes(
        &self,
        old: &Snapshot,
        new: &Snapshot,
        matches: &EndpointMatches<'_>,
    ) -> ChangeSet {
        let endpoints = EndpointChangeComputer::new(self.rules.clone(), self.rename);
        let parameters = ParameterChangeComputer::new(self.rules.clone());
        let bodies = RequestBodyChangeComputer::new(self.rules.clone());
        let responses = ResponseChangeComputer::new(self.rules.clone());
        let schema = SchemaChangeComputer::new(self.rules.clone());

        let mut result = ChangeSet::new();
        for (name, set) in [
            (endpoints.name(), endpoints.compute(old, new, matches)),
            (parameters.name(), parameters.compute(old, new, matches)),
            (bodies.name(), bodies.compute(old, new, matches)),
            (responses.name(), responses.compute(old, new, matches)),
            (schema.name(), schema.compute(old, new, matches)),
        ] {
            debug!("{name} produced {} changes", set.len());
            result.extend(set);
        }
        result
    }

    /// Every element of a brand-new API is an addition.
    fn created(&self, new: &Snapshot) -> ChangeSet {
        let mut result = ChangeSet::new();
        for id in index_endpoints(new).keys() {
            result.push(self.rules.classify(
                RuleKind::EndpointAdded,
                id.as_str(),
                format!("Endpoint `{id}` was added"),
            ));
        }
        for type_def in &new.types {
            result.push(self.rules.classify(
                RuleKind::TypeAdded,
                type_def.name.as_str(),
                format!("Type `{}` was added", type_def.name),
            ));
        }
        result
    }

    /// An API removed entirely: one record per element plus one breaking
    /// change for the API itself.
    fn retired(&self, old: &Snapshot) -> ChangeSet {
        let mut result = ChangeSet::new();
        result.push(self.rules.classify(
            RuleKind::ApiRemoved,
            "*",
            format!("API `{}` was removed entirely", old.name),
        ));
        for id in index_endpoints(old).keys() {
            result.push(self.rules.classify(
                RuleKind::EndpointRemovedWithApi,
                id.as_str(),
                format!("Endpoint `{id}` was removed with the API"),
            ));
        }
        for type_def in &old.types {
            result.push(self.rules.classify(
                RuleKind::TypeRemovedWithApi,
                type_def.name.as_str(),
                format!("Type `{}` was removed with the API", type_def.name),
            ));
        }
        result
    }

    fn assemble(
        &self,
        api_name: String,
        from_version: Option<String>,
        to_version: Option<String>,
        mut set: ChangeSet,
        generated_at: DateTime<Utc>,
    ) -> Changelog {
        let mut changes = std::mem::take(&mut set.changes);
        sort_by_severity(&mut changes);

        let breaking_changes: Vec<BreakingChange> = changes
            .iter()
            .filter_map(|change| self.rules.breaking(change, set.migration_for(change).cloned()))
            .collect();
        let risk = assess_risk(&changes, &breaking_changes);

        debug!(
            "Changelog for {api_name}: {} changes, {} breaking",
            changes.len(),
            breaking_changes.len()
        );

        Changelog {
            api_name,
            from_version,
            to_version,
            changes,
            breaking_changes,
            risk,
            generated_at,
        }
    }
}

fn non_empty(version: &str) -> Option<String> {
    let trimmed = version.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
