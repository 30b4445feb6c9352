//! Parameter change computer implementation.

use crate::diff::matching::{index_parameters, EndpointMatches, MatchedEndpoint};
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::diff::{ClassificationRules, RuleKind};
use crate::model::{Parameter, Snapshot};

/// Computes parameter changes for endpoints present in both snapshots.
pub struct ParameterChangeComputer {
    rules: ClassificationRules,
}

impl ParameterChangeComputer {
    #[must_use]
    pub const fn new(rules: ClassificationRules) -> Self {
        Self { rules }
    }

    fn locator(endpoint_id: &str, param: &Parameter) -> String {
        format!("{endpoint_id}.parameters.{}.{}", param.location, param.name)
    }

    fn compare_endpoint(&self, pair: MatchedEndpoint<'_>, result: &mut ChangeSet) {
        let old_params = index_parameters(pair.old);
        let new_params = index_parameters(pair.new);

        for (key, old) in &old_params {
            if new_params.contains_key(key) {
                continue;
            }
            let path = Self::locator(pair.id, old);
            let (rule, kind) = if old.required {
                (RuleKind::ParameterRemovedRequired, "Required")
            } else {
                (RuleKind::ParameterRemovedOptional, "Optional")
            };
            result.push(self.rules.classify(
                rule,
                path,
                format!("{kind} {} parameter `{}` was removed", old.location, old.name),
            ));
        }

        for (key, new) in &new_params {
            let path = Self::locator(pair.id, new);
            let Some(old) = old_params.get(key) else {
                let (rule, kind) = if new.required {
                    (RuleKind::ParameterAddedRequired, "Required")
                } else {
                    (RuleKind::ParameterAddedOptional, "Optional")
                };
                result.push(self.rules.classify(
                    rule,
                    path,
                    format!("{kind} {} parameter `{}` was added", new.location, new.name),
                ));
                continue;
            };
            self.compare_parameter(old, new, &path, result);
        }
    }

    fn compare_parameter(
        &self,
        old: &Parameter,
        new: &Parameter,
        path: &str,
        result: &mut ChangeSet,
    ) {
        if old.param_type != new.param_type {
            result.push(self.rules.classify(
                RuleKind::ParameterTypeChanged,
                path,
                format!(
                    "Parameter `{}` type changed from `{}` to `{}`",
                    new.name, old.param_type, new.param_type
                ),
            ));
        }

        match (old.required, new.required) {
            (false, true) => result.push(self.rules.classify(
                RuleKind::ParameterMadeRequired,
                path,
                format!("Parameter `{}` is now required", new.name),
            )),
            (true, false) => result.push(self.rules.classify(
                RuleKind::ParameterMadeOptional,
                path,
                format!("Parameter `{}` is now optional", new.name),
            )),
            _ => {}
        }

        if old.default_value != new.default_value {
            result.push(self.rules.classify(
                RuleKind::ParameterDefaultChanged,
                path,
                format!(
                    "Parameter `{}` default changed from {} to {}",
                    new.name,
                    describe_default(old.default_value.as_deref()),
                    describe_default(new.default_value.as_deref()),
                ),
            ));
        }

        if !old.deprecated && new.deprecated {
            result.push(self.rules.classify(
                RuleKind::ParameterDeprecated,
                path,
                format!("Parameter `{}` was deprecated", new.name),
            ));
        }
    }
}

fn describe_default(value: Option<&str>) -> String {
    value.map_or_else(|| "none".to_string(), |v| format!("`{v}`"))
}

impl Default for ParameterChangeComputer {
    fn default() -> Self {
        Self::new(ClassificationRules::default())
    }
}

impl ChangeComputer for ParameterChangeComputer {
    type ChangeSet = ChangeSet;

    fn compute(
        &self,
        _old: &Snapshot,
        _new: &Snapshot,
        matches: &EndpointMatches<'_>,
    ) -> ChangeSet {
        let mut result = ChangeSet::new();
        for pair in matches.matched() {
            self.compare_endpoint(pair, &mut result);
        }
        result
    }

    fn name(&self) -> &'static str {
        "ParameterChangeComputer"
    }
}
