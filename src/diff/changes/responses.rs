//! Response change computer implementation.

use crate::diff::matching::EndpointMatches;
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::diff::{ClassificationRules, RuleKind};
use crate::model::{Endpoint, Response, Snapshot};
use indexmap::IndexMap;

/// Computes response changes for endpoints present in both snapshots.
pub struct ResponseChangeComputer {
    rules: ClassificationRules,
}

impl ResponseChangeComputer {
    #[must_use]
    pub const fn new(rules: ClassificationRules) -> Self {
        Self { rules }
    }
}

/// Responses keyed by status; the first declaration of a status wins.
fn index_responses(endpoint: &Endpoint) -> IndexMap<&str, &Response> {
    let mut map = IndexMap::new();
    for response in &endpoint.responses {
        map.entry(response.status.trim()).or_insert(response);
    }
    map
}

impl Default for ResponseChangeComputer {
    fn default() -> Self {
        Self::new(ClassificationRules::default())
    }
}

impl ChangeComputer for ResponseChangeComputer {
    type ChangeSet = ChangeSet;

    fn compute(
        &self,
        _old: &Snapshot,
        _new: &Snapshot,
        matches: &EndpointMatches<'_>,
    ) -> ChangeSet {
        let mut result = ChangeSet::new();

        for pair in matches.matched() {
            let old_responses = index_responses(pair.old);
            let new_responses = index_responses(pair.new);

            for (status, old) in &old_responses {
                let path = format!("{}.responses.{status}", pair.id);
                match new_responses.get(status) {
                    None => {
                        let rule = if old.is_success() {
                            RuleKind::SuccessResponseRemoved
                        } else {
                            RuleKind::ResponseRemoved
                        };
                        result.push(self.rules.classify(
                            rule,
                            path,
                            format!("Response `{status}` of `{}` was removed", pair.id),
                        ));
                    }
                    Some(new) => {
                        if old.content_type != new.content_type || old.schema != new.schema {
                            result.push(self.rules.classify(
                                RuleKind::ResponseSchemaChanged,
                                path,
                                format!("Response `{status}` of `{}` changed shape", pair.id),
                            ));
                        }
                    }
                }
            }

            for status in new_responses.keys() {
                if !old_responses.contains_key(status) {
                    result.push(self.rules.classify(
                        RuleKind::ResponseAdded,
                        format!("{}.responses.{status}", pair.id),
                        format!("Response `{status}` of `{}` was added", pair.id),
                    ));
                }
            }
        }

        result
    }

    fn name(&self) -> &'static str {
        "ResponseChangeComputer"
    }
}
