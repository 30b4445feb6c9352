//! Trait definitions for diff computation strategies.
//!
//! Each change computer detects one family of changes (endpoints, parameters,
//! request bodies, responses, schema graph) so they can be tested in isolation.

use super::matching::EndpointMatches;
use crate::model::{Change, Snapshot};
use std::collections::HashMap;

/// Trait for computing a specific family of changes between snapshots.
pub trait ChangeComputer: Send + Sync {
    /// The type of changes this computer produces.
    type ChangeSet;

    /// Compute changes between old and new snapshots given endpoint matches.
    fn compute(&self, old: &Snapshot, new: &Snapshot, matches: &EndpointMatches<'_>)
        -> Self::ChangeSet;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &'static str;
}

/// Changes found by one computer, with optional migration guidance keyed by
/// change id.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub changes: Vec<Change>,
    pub migrations: HashMap<String, String>,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Record a change together with a specific migration suggestion.
    pub fn push_with_migration(&mut self, change: Change, migration: impl Into<String>) {
        self.migrations.insert(change.id.clone(), migration.into());
        self.changes.push(change);
    }

    /// Append another set, keeping insertion order.
    pub fn extend(&mut self, other: Self) {
        self.changes.extend(other.changes);
        self.migrations.extend(other.migrations);
    }

    /// Migration suggestion recorded for a change, if any.
    #[must_use]
    pub fn migration_for(&self, change: &Change) -> Option<&String> {
        self.migrations.get(&change.id)
    }
}
