//! Schema-graph change computer implementation.
//!
//! GraphQL and Protobuf sources describe their surface as named types. Types
//! are matched by name, fields by name within a type. Whether a field change
//! breaks consumers depends on the direction data flows: consumers read output
//! types (objects, interfaces, messages) and write input types.

use crate::diff::matching::{index_types, missing_from, EndpointMatches};
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::diff::{ClassificationRules, RuleKind};
use crate::model::{Field, Snapshot, TypeDefinition, TypeKind};
use indexmap::IndexMap;

/// Computes type, field, enum value and union member changes.
pub struct SchemaChangeComputer {
    rules: ClassificationRules,
}

impl SchemaChangeComputer {
    #[must_use]
    pub const fn new(rules: ClassificationRules) -> Self {
        Self { rules }
    }

    fn compare_type(&self, old: &TypeDefinition, new: &TypeDefinition, result: &mut ChangeSet) {
        let name = new.name.as_str();

        if old.kind != new.kind {
            // field-level comparison is meaningless across kinds
            result.push(self.rules.classify(
                RuleKind::TypeKindChanged,
                name,
                format!("Type `{name}` changed from {} to {}", old.kind, new.kind),
            ));
            return;
        }

        if !old.deprecated && new.deprecated {
            result.push(self.rules.classify(
                RuleKind::TypeDeprecated,
                name,
                format!("Type `{name}` was deprecated"),
            ));
        }

        self.compare_fields(old, new, result);

        for value in missing_from(&old.enum_values, &new.enum_values) {
            result.push(self.rules.classify(
                RuleKind::EnumValueRemoved,
                format!("{name}.{value}"),
                format!("Enum value `{value}` was removed from `{name}`"),
            ));
        }
        for value in missing_from(&new.enum_values, &old.enum_values) {
            result.push(self.rules.classify(
                RuleKind::EnumValueAdded,
                format!("{name}.{value}"),
                format!("Enum value `{value}` was added to `{name}`"),
            ));
        }

        for member in missing_from(&old.union_members, &new.union_members) {
            result.push(self.rules.classify(
                RuleKind::UnionMemberRemoved,
                format!("{name}.{member}"),
                format!("Union member `{member}` was removed from `{name}`"),
            ));
        }
        for member in missing_from(&new.union_members, &old.union_members) {
            result.push(self.rules.classify(
                RuleKind::UnionMemberAdded,
                format!("{name}.{member}"),
                format!("Union member `{member}` was added to `{name}`"),
            ));
        }
    }

    fn compare_fields(&self, old: &TypeDefinition, new: &TypeDefinition, result: &mut ChangeSet) {
        let kind = new.kind;
        let old_fields = index_fields(old);
        let new_fields = index_fields(new);

        for (field_name, field) in &old_fields {
            if new_fields.contains_key(field_name) {
                continue;
            }
            let rule = if kind.is_input() {
                if field.required {
                    RuleKind::InputFieldRemovedRequired
                } else {
                    RuleKind::InputFieldRemovedOptional
                }
            } else {
                RuleKind::OutputFieldRemoved
            };
            result.push(self.rules.classify(
                rule,
                format!("{}.{field_name}", new.name),
                format!("Field `{field_name}` was removed from `{}`", new.name),
            ));
        }

        for (field_name, field) in &new_fields {
            let path = format!("{}.{field_name}", new.name);
            match old_fields.get(field_name) {
                None => {
                    let required_input =
                        kind.is_input() && field.required && field.default_value.is_none();
                    let rule = if required_input {
                        RuleKind::InputFieldAddedRequired
                    } else {
                        RuleKind::FieldAdded
                    };
                    result.push(self.rules.classify(
                        rule,
                        path,
                        format!("Field `{field_name}` was added to `{}`", new.name),
                    ));
                }
                Some(old_field) => self.compare_field(kind, old_field, field, &path, result),
            }
        }
    }

    fn compare_field(
        &self,
        kind: TypeKind,
        old: &Field,
        new: &Field,
        path: &str,
        result: &mut ChangeSet,
    ) {
        if old.field_type != new.field_type {
            result.push(self.rules.classify(
                RuleKind::FieldTypeChanged,
                path,
                format!(
                    "Field `{path}` type changed from `{}` to `{}`",
                    old.field_type, new.field_type
                ),
            ));
        }

        let requiredness = match (kind.is_input(), old.required, new.required) {
            (true, false, true) => Some((RuleKind::InputFieldMadeRequired, "is now required")),
            (true, true, false) => Some((RuleKind::InputFieldMadeOptional, "is now optional")),
            (false, true, false) => Some((RuleKind::FieldMadeNullable, "is now nullable")),
            (false, false, true) => Some((RuleKind::FieldMadeNonNull, "is now non-null")),
            _ => None,
        };
        if let Some((rule, what)) = requiredness {
            result.push(self.rules.classify(rule, path, format!("Field `{path}` {what}")));
        }

        if kind.is_input() && old.default_value != new.default_value {
            result.push(self.rules.classify(
                RuleKind::InputFieldDefaultChanged,
                path,
                format!("Default of input field `{path}` changed"),
            ));
        }

        if kind == TypeKind::Message {
            if let (Some(old_number), Some(new_number)) = (old.number, new.number) {
                if old_number != new_number {
                    result.push(self.rules.classify(
                        RuleKind::FieldNumberChanged,
                        path,
                        format!("Field `{path}` number changed from {old_number} to {new_number}"),
                    ));
                }
            }
        }

        if !old.deprecated && new.deprecated {
            result.push(self.rules.classify(
                RuleKind::FieldDeprecated,
                path,
                format!("Field `{path}` was deprecated"),
            ));
        }
    }
}

fn index_fields(type_def: &TypeDefinition) -> IndexMap<&str, &Field> {
    let mut map = IndexMap::new();
    for field in &type_def.fields {
        map.entry(field.name.as_str()).or_insert(field);
    }
    map
}

impl Default for SchemaChangeComputer {
    fn default() -> Self {
        Self::new(ClassificationRules::default())
    }
}

impl ChangeComputer for SchemaChangeComputer {
    type ChangeSet = ChangeSet;

    fn compute(&self, old: &Snapshot, new: &Snapshot, _matches: &EndpointMatches<'_>) -> ChangeSet {
        let mut result = ChangeSet::new();
        let old_types = index_types(old);
        let new_types = index_types(new);

        for (name, _) in &old_types {
            if !new_types.contains_key(name) {
                result.push(self.rules.classify(
                    RuleKind::TypeRemoved,
                    *name,
                    format!("Type `{name}` was removed"),
                ));
            }
        }

        for (name, new_type) in &new_types {
            match old_types.get(name) {
                None => result.push(self.rules.classify(
                    RuleKind::TypeAdded,
                    *name,
                    format!("Type `{name}` was added"),
                )),
                Some(old_type) => self.compare_type(old_type, new_type, &mut result),
            }
        }

        result
    }

    fn name(&self) -> &'static str {
        "SchemaChangeComputer"
    }
}
