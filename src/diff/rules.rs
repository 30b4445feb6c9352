//! Classification rules: the severity/category/type taxonomy.
//!
//! Every situation the diff engine can detect has a [`RuleKind`]. A rule fixes
//! the change type and category; its severity has a default that callers may
//! override through [`ClassificationRules`].

use crate::model::{BreakingChange, Change, ChangeCategory, ChangeType, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a detection rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum RuleKind {
    // Endpoints
    EndpointAdded,
    EndpointRemoved,
    EndpointDeprecated,
    EndpointUndeprecated,
    /// The whole API disappeared
    ApiRemoved,
    /// Per-endpoint record accompanying `ApiRemoved`
    EndpointRemovedWithApi,

    // Parameters
    ParameterAddedRequired,
    ParameterAddedOptional,
    ParameterRemovedRequired,
    ParameterRemovedOptional,
    ParameterTypeChanged,
    ParameterMadeRequired,
    ParameterMadeOptional,
    ParameterDefaultChanged,
    ParameterDeprecated,

    // Request bodies
    RequestBodyAddedRequired,
    RequestBodyAddedOptional,
    RequestBodyRemoved,
    RequestBodyMadeRequired,
    RequestBodyMadeOptional,
    RequestBodyContentTypeRemoved,
    RequestBodyContentTypeAdded,
    RequestBodySchemaChanged,

    // Responses
    ResponseAdded,
    ResponseRemoved,
    SuccessResponseRemoved,
    ResponseSchemaChanged,

    // Schema-graph types
    TypeAdded,
    TypeRemoved,
    TypeKindChanged,
    TypeDeprecated,
    /// Per-type record accompanying `ApiRemoved`
    TypeRemovedWithApi,

    // Fields
    FieldAdded,
    InputFieldAddedRequired,
    OutputFieldRemoved,
    InputFieldRemovedRequired,
    InputFieldRemovedOptional,
    FieldTypeChanged,
    FieldMadeNullable,
    FieldMadeNonNull,
    InputFieldMadeRequired,
    InputFieldMadeOptional,
    InputFieldDefaultChanged,
    FieldNumberChanged,
    FieldDeprecated,

    // Enum values and union members
    EnumValueAdded,
    EnumValueRemoved,
    UnionMemberAdded,
    UnionMemberRemoved,
}

impl RuleKind {
    /// Every rule, in declaration order.
    pub const ALL: [Self; 49] = [
        Self::EndpointAdded,
        Self::EndpointRemoved,
        Self::EndpointDeprecated,
        Self::EndpointUndeprecated,
        Self::ApiRemoved,
        Self::EndpointRemovedWithApi,
        Self::ParameterAddedRequired,
        Self::ParameterAddedOptional,
        Self::ParameterRemovedRequired,
        Self::ParameterRemovedOptional,
        Self::ParameterTypeChanged,
        Self::ParameterMadeRequired,
        Self::ParameterMadeOptional,
        Self::ParameterDefaultChanged,
        Self::ParameterDeprecated,
        Self::RequestBodyAddedRequired,
        Self::RequestBodyAddedOptional,
        Self::RequestBodyRemoved,
        Self::RequestBodyMadeRequired,
        Self::RequestBodyMadeOptional,
        Self::RequestBodyContentTypeRemoved,
        Self::RequestBodyContentTypeAdded,
        Self::RequestBodySchemaChanged,
        Self::ResponseAdded,
        Self::ResponseRemoved,
        Self::SuccessResponseRemoved,
        Self::ResponseSchemaChanged,
        Self::TypeAdded,
        Self::TypeRemoved,
        Self::TypeKindChanged,
        Self::TypeDeprecated,
        Self::TypeRemovedWithApi,
        Self::FieldAdded,
        Self::InputFieldAddedRequired,
        Self::OutputFieldRemoved,
        Self::InputFieldRemovedRequired,
        Self::InputFieldRemovedOptional,
        Self::FieldTypeChanged,
        Self::FieldMadeNullable,
        Self::FieldMadeNonNull,
        Self::InputFieldMadeRequired,
        Self::InputFieldMadeOptional,
        Self::InputFieldDefaultChanged,
        Self::FieldNumberChanged,
        Self::FieldDeprecated,
        Self::EnumValueAdded,
        Self::EnumValueRemoved,
        Self::UnionMemberAdded,
        Self::UnionMemberRemoved,
    ];

    /// Change type implied by the rule.
    #[must_use]
    pub const fn change_type(&self) -> ChangeType {
        match self {
            Self::EndpointAdded
            | Self::ParameterAddedRequired
            | Self::ParameterAddedOptional
            | Self::RequestBodyAddedRequired
            | Self::RequestBodyAddedOptional
            | Self::RequestBodyContentTypeAdded
            | Self::ResponseAdded
            | Self::TypeAdded
            | Self::FieldAdded
            | Self::InputFieldAddedRequired
            | Self::EnumValueAdded
            | Self::UnionMemberAdded => ChangeType::Added,

            Self::EndpointRemoved
            | Self::ApiRemoved
            | Self::EndpointRemovedWithApi
            | Self::ParameterRemovedRequired
            | Self::ParameterRemovedOptional
            | Self::RequestBodyRemoved
            | Self::ResponseRemoved
            | Self::SuccessResponseRemoved
            | Self::TypeRemoved
            | Self::TypeRemovedWithApi
            | Self::OutputFieldRemoved
            | Self::InputFieldRemovedRequired
            | Self::InputFieldRemovedOptional
            | Self::EnumValueRemoved
            | Self::UnionMemberRemoved => ChangeType::Removed,

            Self::EndpointDeprecated
            | Self::ParameterDeprecated
            | Self::TypeDeprecated
            | Self::FieldDeprecated => ChangeType::Deprecated,

            Self::EndpointUndeprecated
            | Self::ParameterTypeChanged
            | Self::ParameterMadeRequired
            | Self::ParameterMadeOptional
            | Self::ParameterDefaultChanged
            | Self::RequestBodyMadeRequired
            | Self::RequestBodyMadeOptional
            | Self::RequestBodyContentTypeRemoved
            | Self::RequestBodySchemaChanged
            | Self::ResponseSchemaChanged
            | Self::TypeKindChanged
            | Self::FieldTypeChanged
            | Self::FieldMadeNullable
            | Self::FieldMadeNonNull
            | Self::InputFieldMadeRequired
            | Self::InputFieldMadeOptional
            | Self::InputFieldDefaultChanged
            | Self::FieldNumberChanged => ChangeType::Modified,
        }
    }

    /// Category implied by the rule.
    #[must_use]
    pub const fn category(&self) -> ChangeCategory {
        match self {
            Self::EndpointAdded
            | Self::EndpointRemoved
            | Self::EndpointDeprecated
            | Self::EndpointUndeprecated
            | Self::ApiRemoved
            | Self::EndpointRemovedWithApi => ChangeCategory::Endpoint,

            Self::ParameterAddedRequired
            | Self::ParameterAddedOptional
            | Self::ParameterRemovedRequired
            | Self::ParameterRemovedOptional
            | Self::ParameterTypeChanged
            | Self::ParameterMadeRequired
            | Self::ParameterMadeOptional
            | Self::ParameterDefaultChanged
            | Self::ParameterDeprecated => ChangeCategory::Parameter,

            Self::RequestBodyAddedRequired
            | Self::RequestBodyAddedOptional
            | Self::RequestBodyRemoved
            | Self::RequestBodyMadeRequired
            | Self::RequestBodyMadeOptional
            | Self::RequestBodyContentTypeRemoved
            | Self::RequestBodyContentTypeAdded
            | Self::RequestBodySchemaChanged => ChangeCategory::RequestBody,

            Self::ResponseAdded
            | Self::ResponseRemoved
            | Self::SuccessResponseRemoved
            | Self::ResponseSchemaChanged => ChangeCategory::Response,

            Self::TypeAdded
            | Self::TypeRemoved
            | Self::TypeKindChanged
            | Self::TypeDeprecated
            | Self::TypeRemovedWithApi => ChangeCategory::Type,

            Self::FieldAdded
            | Self::InputFieldAddedRequired
            | Self::OutputFieldRemoved
            | Self::InputFieldRemovedRequired
            | Self::InputFieldRemovedOptional
            | Self::FieldTypeChanged
            | Self::FieldMadeNullable
            | Self::FieldMadeNonNull
            | Self::InputFieldMadeRequired
            | Self::InputFieldMadeOptional
            | Self::InputFieldDefaultChanged
            | Self::FieldNumberChanged
            | Self::FieldDeprecated => ChangeCategory::Field,

            Self::EnumValueAdded | Self::EnumValueRemoved => ChangeCategory::EnumValue,

            Self::UnionMemberAdded | Self::UnionMemberRemoved => ChangeCategory::UnionMember,
        }
    }

    /// Severity used when no override is configured.
    #[must_use]
    pub const fn default_severity(&self) -> Severity {
        match self {
            Self::EndpointRemoved
            | Self::ApiRemoved
            | Self::ParameterAddedRequired
            | Self::ParameterRemovedRequired
            | Self::ParameterTypeChanged
            | Self::ParameterMadeRequired
            | Self::RequestBodyAddedRequired
            | Self::RequestBodyMadeRequired
            | Self::RequestBodyContentTypeRemoved
            | Self::TypeRemoved
            | Self::TypeKindChanged
            | Self::InputFieldAddedRequired
            | Self::OutputFieldRemoved
            | Self::InputFieldRemovedRequired
            | Self::FieldTypeChanged
            | Self::InputFieldMadeRequired
            | Self::FieldNumberChanged
            | Self::EnumValueRemoved
            | Self::UnionMemberRemoved => Severity::Breaking,

            Self::ParameterDefaultChanged
            | Self::RequestBodySchemaChanged
            | Self::SuccessResponseRemoved
            | Self::FieldMadeNullable
            | Self::InputFieldDefaultChanged => Severity::Dangerous,

            Self::EndpointDeprecated
            | Self::EndpointRemovedWithApi
            | Self::ParameterRemovedOptional
            | Self::ParameterDeprecated
            | Self::RequestBodyRemoved
            | Self::ResponseRemoved
            | Self::ResponseSchemaChanged
            | Self::TypeDeprecated
            | Self::TypeRemovedWithApi
            | Self::InputFieldRemovedOptional
            | Self::FieldDeprecated => Severity::Warning,

            Self::EndpointAdded
            | Self::EndpointUndeprecated
            | Self::ParameterAddedOptional
            | Self::ParameterMadeOptional
            | Self::RequestBodyAddedOptional
            | Self::RequestBodyMadeOptional
            | Self::RequestBodyContentTypeAdded
            | Self::ResponseAdded
            | Self::TypeAdded
            | Self::FieldAdded
            | Self::FieldMadeNonNull
            | Self::InputFieldMadeOptional
            | Self::EnumValueAdded
            | Self::UnionMemberAdded => Severity::Info,
        }
    }

    /// Consumer impact when the rule yields a breaking change.
    ///
    /// Rules that are not breaking by default fall back to a per-category value
    /// so that a severity override still produces a meaningful score.
    #[must_use]
    pub const fn impact_score(&self) -> u8 {
        match self {
            Self::ApiRemoved => 100,
            Self::EndpointRemoved => 90,
            Self::TypeRemoved | Self::TypeKindChanged => 85,
            Self::OutputFieldRemoved | Self::FieldNumberChanged => 80,
            Self::ParameterTypeChanged
            | Self::FieldTypeChanged
            | Self::RequestBodyContentTypeRemoved => 75,
            Self::ParameterAddedRequired
            | Self::ParameterMadeRequired
            | Self::RequestBodyAddedRequired
            | Self::RequestBodyMadeRequired
            | Self::InputFieldAddedRequired
            | Self::InputFieldMadeRequired => 70,
            Self::ParameterRemovedRequired | Self::InputFieldRemovedRequired => 65,
            Self::EnumValueRemoved | Self::UnionMemberRemoved => 60,
            _ => match self.category() {
                ChangeCategory::Endpoint | ChangeCategory::Type => 60,
                ChangeCategory::RequestBody | ChangeCategory::Response => 55,
                _ => 50,
            },
        }
    }

    /// Generic migration guidance for consumers.
    #[must_use]
    pub const fn migration_hint(&self) -> &'static str {
        match self {
            Self::ApiRemoved => "Migrate all consumers off this API before decommissioning it",
            Self::EndpointRemoved => "Move callers to a replacement endpoint before upgrading",
            Self::ParameterAddedRequired | Self::InputFieldAddedRequired => {
                "Update callers to send the new required value, or give it a default"
            }
            Self::ParameterRemovedRequired | Self::InputFieldRemovedRequired => {
                "Stop sending the removed value; check whether its behavior moved elsewhere"
            }
            Self::ParameterTypeChanged | Self::FieldTypeChanged => {
                "Update client models and serializers to the new type"
            }
            Self::ParameterMadeRequired
            | Self::RequestBodyMadeRequired
            | Self::InputFieldMadeRequired => "Ensure every caller now supplies this value",
            Self::RequestBodyAddedRequired => "Send a request body on every call",
            Self::RequestBodyContentTypeRemoved => {
                "Switch callers to one of the remaining content types"
            }
            Self::TypeRemoved | Self::OutputFieldRemoved => {
                "Remove client references to the deleted element and regenerate clients"
            }
            Self::TypeKindChanged => "Regenerate clients against the new type definition",
            Self::FieldNumberChanged => {
                "Regenerate protobuf stubs; old and new field tags are wire-incompatible"
            }
            Self::EnumValueRemoved => "Stop sending the removed enum value and handle its absence",
            Self::UnionMemberRemoved => "Drop handling for the removed union member",
            _ => "Review consumers of this element before upgrading",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // kebab-case, matching the configuration key
        let label = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{self:?}"));
        write!(f, "{label}")
    }
}

/// Severity policy applied by the diff engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationRules {
    overrides: BTreeMap<RuleKind, Severity>,
}

impl ClassificationRules {
    /// Default taxonomy, no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a configured override table.
    #[must_use]
    pub fn from_overrides(overrides: BTreeMap<RuleKind, Severity>) -> Self {
        Self { overrides }
    }

    /// Override the severity of one rule.
    #[must_use]
    pub fn with_override(mut self, rule: RuleKind, severity: Severity) -> Self {
        self.overrides.insert(rule, severity);
        self
    }

    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Effective severity of a rule.
    #[must_use]
    pub fn severity(&self, rule: RuleKind) -> Severity {
        self.overrides
            .get(&rule)
            .copied()
            .unwrap_or_else(|| rule.default_severity())
    }

    /// Create a change with the effective severity of `rule`.
    pub fn classify(
        &self,
        rule: RuleKind,
        path: impl Into<String>,
        description: impl Into<String>,
    ) -> Change {
        Change::new(rule, self.severity(rule), path, description)
    }

    /// Derive the breaking-change record for a change, if it is breaking.
    #[must_use]
    pub fn breaking(&self, change: &Change, migration: Option<String>) -> Option<BreakingChange> {
        let suggestion = migration.or_else(|| Some(change.rule.migration_hint().to_string()));
        BreakingChange::new(change.clone(), change.rule.impact_score(), suggestion)
    }
}

/// Stable sort by severity, most severe first; insertion order is kept
/// within a severity band.
pub fn sort_by_severity(changes: &mut [Change]) {
    changes.sort_by_key(|c| c.severity.rank());
}
