//! Change computer implementations.
//!
//! This module provides concrete implementations of the `ChangeComputer` trait
//! for each family of changes: endpoints, parameters, request bodies,
//! responses and the schema graph.

mod endpoints;
mod parameters;
mod request_body;
mod responses;
mod schema;

pub use endpoints::EndpointChangeComputer;
pub use parameters::ParameterChangeComputer;
pub use request_body::RequestBodyChangeComputer;
pub use responses::ResponseChangeComputer;
pub use schema::SchemaChangeComputer;
