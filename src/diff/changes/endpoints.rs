//! Endpoint change computer implementation.

use crate::diff::engine_config::RenameDetection;
use crate::diff::matching::EndpointMatches;
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::diff::{ClassificationRules, RuleKind};
use crate::model::{Endpoint, Snapshot};
use tracing::debug;

/// Computes endpoint-level changes: additions, removals and deprecation flips.
pub struct EndpointChangeComputer {
    rules: ClassificationRules,
    rename: RenameDetection,
}

impl EndpointChangeComputer {
    #[must_use]
    pub const fn new(rules: ClassificationRules, rename: RenameDetection) -> Self {
        Self { rules, rename }
    }

    /// Best rename candidate for a removed endpoint among the added ones.
    fn rename_candidate<'a>(
        &self,
        removed: &Endpoint,
        added: &[(&'a str, &'a Endpoint)],
    ) -> Option<&'a str> {
        let method = removed.method.as_deref()?.to_uppercase();
        added
            .iter()
            .filter(|(_, ep)| {
                ep.method.as_deref().map(str::to_uppercase).as_deref() == Some(method.as_str())
            })
            .filter_map(|(id, ep)| {
                self.rename
                    .similarity(&removed.path, &ep.path)
                    .map(|score| (*id, score))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

impl Default for EndpointChangeComputer {
    fn default() -> Self {
        Self::new(ClassificationRules::default(), RenameDetection::default())
    }
}

impl ChangeComputer for EndpointChangeComputer {
    type ChangeSet = ChangeSet;

    fn compute(
        &self,
        _old: &Snapshot,
        _new: &Snapshot,
        matches: &EndpointMatches<'_>,
    ) -> ChangeSet {
        let mut result = ChangeSet::new();
        let added: Vec<_> = matches.added().collect();

        for (id, endpoint) in matches.removed() {
            let change = self.rules.classify(
                RuleKind::EndpointRemoved,
                id,
                format!("Endpoint `{id}` was removed"),
            );
            match self.rename_candidate(endpoint, &added) {
                Some(target) => {
                    debug!("Removed endpoint {id} looks renamed to {target}");
                    result.push_with_migration(
                        change,
                        format!(
                            "Endpoint may have moved to `{target}`; update callers to the new path"
                        ),
                    );
                }
                None => result.push(change),
            }
        }

        for (id, _) in &added {
            result.push(self.rules.classify(
                RuleKind::EndpointAdded,
                *id,
                format!("Endpoint `{id}` was added"),
            ));
        }

        for pair in matches.matched() {
            match (pair.old.deprecated, pair.new.deprecated) {
                (false, true) => result.push(self.rules.classify(
                    RuleKind::EndpointDeprecated,
                    pair.id,
                    format!("Endpoint `{}` was deprecated", pair.id),
                )),
                (true, false) => result.push(self.rules.classify(
                    RuleKind::EndpointUndeprecated,
                    pair.id,
                    format!("Endpoint `{}` is no longer deprecated", pair.id),
                )),
                _ => {}
            }
        }

        result
    }

    fn name(&self) -> &'static str {
        "EndpointChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeType, Severity, SourceType};

    fn snapshot(version: &str, endpoints: Vec<Endpoint>) -> Snapshot {
        endpoints
            .into_iter()
            .fold(Snapshot::new("users", version, SourceType::OpenApi), Snapshot::with_endpoint)
    }

    #[test]
    fn test_endpoint_computer_name() {
        assert_eq!(EndpointChangeComputer::default().name(), "EndpointChangeComputer");
    }

    #[test]
    fn test_added_and_removed_endpoints() {
        let old = snapshot(
            "1",
            vec![Endpoint::new("GET", "/users"), Endpoint::new("GET", "/users/{id}")],
        );
        let new = snapshot(
            "2",
            vec![Endpoint::new("GET", "/users"), Endpoint::new("POST", "/users")],
        );
        let matches = EndpointMatches::build(&old, &new);

        let result = EndpointChangeComputer::default().compute(&old, &new, &matches);
        assert_eq!(result.len(), 2);
        assert_eq!(result.changes[0].change_type, ChangeType::Removed);
        assert_eq!(result.changes[0].severity, Severity::Breaking);
        assert_eq!(result.changes[0].path, "GET /users/{id}");
        assert_eq!(result.changes[1].change_type, ChangeType::Added);
        assert_eq!(result.changes[1].severity, Severity::Info);
        // different method, no rename guess
        assert!(result.migrations.is_empty());
    }

    #[test]
    fn test_rename_detection_adds_migration() {
        let old = snapshot("1", vec![Endpoint::new("GET", "/v1/orders/{id}")]);
        let new = snapshot("2", vec![Endpoint::new("GET", "/v2/orders/{id}")]);
        let matches = EndpointMatches::build(&old, &new);

        let result = EndpointChangeComputer::default().compute(&old, &new, &matches);
        let removed = &result.changes[0];
        let hint = result.migration_for(removed).expect("rename suggestion");
        assert!(hint.contains("GET /v2/orders/{id}"));

        let quiet = EndpointChangeComputer::new(
            ClassificationRules::default(),
            RenameDetection::disabled(),
        );
        assert!(quiet.compute(&old, &new, &matches).migrations.is_empty());
    }

    #[test]
    fn test_name_outlives_computer() {
        let name: &'static str = EndpointChangeComputer::default().name();
        assert_eq!(name, "EndpointChangeComputer");
    }

    #[test]
    fn test_deprecation_flips() {
        let old = snapshot(
            "1",
            vec![Endpoint::new("GET", "/a"), Endpoint::new("GET", "/b").deprecated(true)],
        );
        let new = snapshot(
            "2",
            vec![Endpoint::new("GET", "/a").deprecated(true), Endpoint::new("GET", "/b")],
        );
        let matches = EndpointMatches::build(&old, &new);

        let result = EndpointChangeComputer::default().compute(&old, &new, &matches);
        assert_eq!(result.len(), 2);
        assert_eq!(result.changes[0].change_type, ChangeType::Deprecated);
        assert_eq!(result.changes[0].severity, Severity::Warning);
        assert_eq!(result.changes[1].change_type, ChangeType::Modified);
        assert_eq!(result.changes[1].severity, Severity::Info);
    }
}
