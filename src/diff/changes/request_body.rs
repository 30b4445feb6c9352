//! Request body change computer implementation.

use crate::diff::matching::{missing_from, EndpointMatches};
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::diff::{ClassificationRules, RuleKind};
use crate::model::{RequestBody, Snapshot};

/// Computes request body changes for endpoints present in both snapshots.
pub struct RequestBodyChangeComputer {
    rules: ClassificationRules,
}

impl RequestBodyChangeComputer {
    #[must_use]
    pub const fn new(rules: ClassificationRules) -> Self {
        Self { rules }
    }

    fn compare(&self, id: &str, old: &RequestBody, new: &RequestBody, result: &mut ChangeSet) {
        let path = format!("{id}.requestBody");

        match (old.required, new.required) {
            (false, true) => result.push(self.rules.classify(
                RuleKind::RequestBodyMadeRequired,
                &path,
                format!("Request body of `{id}` is now required"),
            )),
            (true, false) => result.push(self.rules.classify(
                RuleKind::RequestBodyMadeOptional,
                &path,
                format!("Request body of `{id}` is now optional"),
            )),
            _ => {}
        }

        for content_type in missing_from(&old.content_types, &new.content_types) {
            result.push(self.rules.classify(
                RuleKind::RequestBodyContentTypeRemoved,
                format!("{path}.{content_type}"),
                format!("Request body of `{id}` no longer accepts `{content_type}`"),
            ));
        }
        for content_type in missing_from(&new.content_types, &old.content_types) {
            result.push(self.rules.classify(
                RuleKind::RequestBodyContentTypeAdded,
                format!("{path}.{content_type}"),
                format!("Request body of `{id}` now accepts `{content_type}`"),
            ));
        }

        if old.schema != new.schema {
            result.push(self.rules.classify(
                RuleKind::RequestBodySchemaChanged,
                &path,
                format!("Request body schema of `{id}` changed"),
            ));
        }
    }
}

impl Default for RequestBodyChangeComputer {
    fn default() -> Self {
        Self::new(ClassificationRules::default())
    }
}

impl ChangeComputer for RequestBodyChangeComputer {
    type ChangeSet = ChangeSet;

    fn compute(
        &self,
        _old: &Snapshot,
        _new: &Snapshot,
        matches: &EndpointMatches<'_>,
    ) -> ChangeSet {
        let mut result = ChangeSet::new();

        for pair in matches.matched() {
            match (&pair.old.request_body, &pair.new.request_body) {
                (None, Some(body)) => {
                    let (rule, kind) = if body.required {
                        (RuleKind::RequestBodyAddedRequired, "required")
                    } else {
                        (RuleKind::RequestBodyAddedOptional, "optional")
                    };
                    result.push(self.rules.classify(
                        rule,
                        format!("{}.requestBody", pair.id),
                        format!("Endpoint `{}` now takes a {kind} request body", pair.id),
                    ));
                }
                (Some(_), None) => result.push(self.rules.classify(
                    RuleKind::RequestBodyRemoved,
                    format!("{}.requestBody", pair.id),
                    format!("Request body of `{}` was removed", pair.id),
                )),
                (Some(old), Some(new)) => self.compare(pair.id, old, new, &mut result),
                (None, None) => {}
            }
        }

        result
    }

    fn name(&self) -> &'static str {
        "RequestBodyChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Endpoint, Severity, SourceType};

    fn diff_bodies(old: Option<RequestBody>, new: Option<RequestBody>) -> ChangeSet {
        let mut old_ep = Endpoint::new("POST", "/users");
        old_ep.request_body = old;
        let mut new_ep = Endpoint::new("POST", "/users");
        new_ep.request_body = new;
        let old = Snapshot::new("api", "1", SourceType::OpenApi).with_endpoint(old_ep);
        let new = Snapshot::new("api", "2", SourceType::OpenApi).with_endpoint(new_ep);
        let matches = EndpointMatches::build(&old, &new);
        RequestBodyChangeComputer::default().compute(&old, &new, &matches)
    }

    #[test]
    fn test_body_added_required_vs_optional() {
        let required = diff_bodies(None, Some(RequestBody::new("application/json", true)));
        assert_eq!(required.changes[0].severity, Severity::Breaking);

        let optional = diff_bodies(None, Some(RequestBody::new("application/json", false)));
        assert_eq!(optional.changes[0].severity, Severity::Info);
    }

    #[test]
    fn test_body_removed_is_warning() {
        let result = diff_bodies(Some(RequestBody::new("application/json", true)), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result.changes[0].severity, Severity::Warning);
    }

    #[test]
    fn test_content_type_changes() {
        let old = RequestBody::new("application/json", true);
        let mut new = RequestBody::new("application/xml", true);
        new.content_types.push("text/plain".to_string());

        let result = diff_bodies(Some(old), Some(new));
        let rules: Vec<_> = result.changes.iter().map(|c| c.rule).collect();
        assert_eq!(
            rules,
            vec![
                RuleKind::RequestBodyContentTypeRemoved,
                RuleKind::RequestBodyContentTypeAdded,
                RuleKind::RequestBodyContentTypeAdded,
            ]
        );
        assert_eq!(result.changes[0].path, "POST /users.requestBody.application/json");
    }

    #[test]
    fn test_requiredness_and_schema_changes() {
        let mut old = RequestBody::new("application/json", false);
        old.schema = Some("#/components/schemas/UserV1".to_string());
        let mut new = RequestBody::new("application/json", true);
        new.schema = Some("#/components/schemas/UserV2".to_string());

        let result = diff_bodies(Some(old), Some(new));
        assert_eq!(result.len(), 2);
        assert_eq!(result.changes[0].rule, RuleKind::RequestBodyMadeRequired);
        assert_eq!(result.changes[1].severity, Severity::Dangerous);
    }

    #[test]
    fn test_identical_bodies_yield_nothing() {
        let body = RequestBody::new("application/json", true);
        assert!(diff_bodies(Some(body.clone()), Some(body)).is_empty());
    }
}
