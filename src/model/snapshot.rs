//! Canonical specification snapshot.
//!
//! Format parsers (OpenAPI, AsyncAPI, GraphQL, Protobuf) normalize their source
//! documents into these structures before diff operations. REST-shaped sources
//! populate [`Snapshot::endpoints`]; schema-graph sources additionally populate
//! [`Snapshot::types`].

use crate::utils::json_fingerprint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source format a snapshot was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
    #[default]
    #[serde(alias = "OPEN_API", alias = "openapi")]
    OpenApi,
    #[serde(alias = "ASYNC_API", alias = "asyncapi")]
    AsyncApi,
    #[serde(alias = "graphql")]
    GraphQl,
    #[serde(alias = "grpc", alias = "PROTOBUF")]
    Grpc,
}

impl SourceType {
    /// Whether the source describes its surface as a schema graph (types and
    /// fields) rather than as request/response endpoints.
    #[must_use]
    pub const fn is_schema_graph(&self) -> bool {
        matches!(self, Self::GraphQl | Self::Grpc)
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenApi => write!(f, "OpenAPI"),
            Self::AsyncApi => write!(f, "AsyncAPI"),
            Self::GraphQl => write!(f, "GraphQL"),
            Self::Grpc => write!(f, "gRPC"),
        }
    }
}

/// Normalized description of an API surface at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// API name (e.g. `info.title`)
    pub name: String,
    /// API version string as declared by the source document
    pub version: String,
    /// Source format
    #[serde(default)]
    pub source_type: SourceType,
    /// Endpoints in document order
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Named types for schema-graph sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDefinition>,
}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        source_type: SourceType,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            source_type,
            endpoints: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Append an endpoint (incremental construction before hand-off).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Append a type definition (incremental construction before hand-off).
    #[must_use]
    pub fn with_type(mut self, type_def: TypeDefinition) -> Self {
        self.types.push(type_def);
        self
    }

    /// Content fingerprint over the API surface.
    ///
    /// Name and version are excluded so that a re-tagged but otherwise
    /// identical surface fingerprints the same. `None` if the surface cannot
    /// be serialized.
    #[must_use]
    pub fn content_hash(&self) -> Option<u64> {
        json_fingerprint(&(&self.endpoints, &self.types))
    }

    /// Total number of parameters across all endpoints.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.endpoints.iter().map(|e| e.parameters.len()).sum()
    }
}

/// A single operation of the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Path or channel/operation key (`/users/{id}`, `user/signedup`, `Query.users`)
    pub path: String,
    /// HTTP verb or RPC kind (`GET`, `publish`, `unary`, `query`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Endpoint {
    /// Create an endpoint for a verb and path.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Some(method.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_request_body(mut self, body: RequestBody) -> Self {
        self.request_body = Some(body);
        self
    }

    #[must_use]
    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Human-readable locator, `GET /users` or the bare path.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.method.as_deref().filter(|m| !m.is_empty()) {
            Some(method) => format!("{} {}", method.to_uppercase(), self.path),
            None => self.path.clone(),
        }
    }

    /// Whether the endpoint carries any documentation text.
    #[must_use]
    pub fn is_documented(&self) -> bool {
        let has_text = |s: &Option<String>| s.as_deref().is_some_and(|t| !t.trim().is_empty());
        has_text(&self.description) || has_text(&self.summary)
    }

    /// Find a parameter by location and name.
    #[must_use]
    pub fn parameter(&self, location: ParameterLocation, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.location == location && p.name == name)
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterLocation {
    #[serde(alias = "path")]
    Path,
    #[serde(alias = "query")]
    Query,
    #[serde(alias = "header")]
    Header,
    #[serde(alias = "body")]
    Body,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Body => "body",
        };
        write!(f, "{s}")
    }
}

/// An operation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    /// Type tag, possibly parameterized (`array<string>`)
    #[serde(rename = "type", default)]
    pub param_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Parameter {
    /// Create a parameter.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: ParameterLocation,
        param_type: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            required,
            param_type: param_type.into(),
            default_value: None,
            deprecated: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Request payload description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content_types: Vec<String>,
    /// Schema reference or structural fingerprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl RequestBody {
    #[must_use]
    pub fn new(content_type: impl Into<String>, required: bool) -> Self {
        Self {
            required,
            content_types: vec![content_type.into()],
            schema: None,
        }
    }
}

/// A declared response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Status code or range (`200`, `4XX`, `default`)
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Response {
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_schema(
        mut self,
        content_type: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        self.content_type = Some(content_type.into());
        self.schema = Some(schema.into());
        self
    }

    /// 2xx status (`200`, `204`, `2XX`).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.trim().starts_with('2')
    }
}

/// Kind of a named schema-graph type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeKind {
    Object,
    Input,
    Interface,
    Enum,
    Union,
    Scalar,
    /// Protobuf message
    Message,
}

impl TypeKind {
    /// Types whose fields are read by consumers.
    #[must_use]
    pub const fn is_output(&self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Message)
    }

    /// Types whose fields are supplied by consumers.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::Input)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Object => "object",
            Self::Input => "input",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Scalar => "scalar",
            Self::Message => "message",
        };
        write!(f, "{s}")
    }
}

/// A named type in a schema-graph source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub union_members: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TypeDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
            enum_values: Vec::new(),
            union_members: Vec::new(),
            deprecated: false,
            description: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_enum_value(mut self, value: impl Into<String>) -> Self {
        self.enum_values.push(value.into());
        self
    }

    #[must_use]
    pub fn with_union_member(mut self, member: impl Into<String>) -> Self {
        self.union_members.push(member.into());
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A field of an object, input or message type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Non-null (GraphQL) or `required` (proto2) field
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    /// Protobuf field tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            required,
            default_value: None,
            deprecated: false,
            number: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub const fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }
}
