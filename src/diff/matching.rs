//! Identity matching of endpoints, parameters and types between snapshots.

use crate::model::{Endpoint, Parameter, ParameterLocation, Snapshot, TypeDefinition};
use indexmap::IndexMap;
use std::hash::Hash;
use tracing::debug;

/// Identity of an endpoint within a snapshot.
///
/// `(METHOD, path)` when both are present, else the operation id, else a
/// synthetic `#<index>` built from the endpoint's position.
#[must_use]
pub fn endpoint_identity(endpoint: &Endpoint, index: usize) -> String {
    let path = endpoint.path.trim();
    let method = endpoint
        .method
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());

    match (method, path.is_empty()) {
        (Some(method), false) => format!("{} {}", method.to_uppercase(), path),
        _ => match endpoint.operation_id.as_deref().filter(|id| !id.trim().is_empty()) {
            Some(id) => id.to_string(),
            None => format!("#{index}"),
        },
    }
}

/// Insert items into an ordered map; the first item for a key wins.
fn first_seen<K, V>(entries: impl IntoIterator<Item = (K, V)>, what: &str) -> IndexMap<K, V>
where
    K: Hash + Eq + std::fmt::Debug,
{
    let mut map = IndexMap::new();
    for (key, value) in entries {
        if map.contains_key(&key) {
            debug!("Skipping duplicate {what} identity {key:?}; first occurrence wins");
            continue;
        }
        map.insert(key, value);
    }
    map
}

/// Endpoints of a snapshot keyed by identity, in snapshot order.
#[must_use]
pub fn index_endpoints(snapshot: &Snapshot) -> IndexMap<String, &Endpoint> {
    first_seen(
        snapshot
            .endpoints
            .iter()
            .enumerate()
            .map(|(i, ep)| (endpoint_identity(ep, i), ep)),
        "endpoint",
    )
}

/// Parameters of an endpoint keyed by `(location, name)`.
#[must_use]
pub fn index_parameters(endpoint: &Endpoint) -> IndexMap<(ParameterLocation, &str), &Parameter> {
    first_seen(
        endpoint
            .parameters
            .iter()
            .map(|p| ((p.location, p.name.as_str()), p)),
        "parameter",
    )
}

/// Type definitions keyed by name.
#[must_use]
pub fn index_types(snapshot: &Snapshot) -> IndexMap<&str, &TypeDefinition> {
    first_seen(
        snapshot.types.iter().map(|t| (t.name.as_str(), t)),
        "type",
    )
}

/// Order-preserving set difference helper for plain string lists.
pub(crate) fn missing_from<'a>(items: &'a [String], other: &[String]) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for item in items {
        if !other.contains(item) && !seen.contains(&item.as_str()) {
            seen.push(item.as_str());
        }
    }
    seen
}

/// An endpoint present in both snapshots.
#[derive(Debug, Clone, Copy)]
pub struct MatchedEndpoint<'a> {
    pub id: &'a str,
    pub old: &'a Endpoint,
    pub new: &'a Endpoint,
}

/// Result of matching endpoints between two snapshots.
#[derive(Debug, Default)]
pub struct EndpointMatches<'a> {
    old: IndexMap<String, &'a Endpoint>,
    new: IndexMap<String, &'a Endpoint>,
}

impl<'a> EndpointMatches<'a> {
    /// Match endpoints of two snapshots by identity.
    #[must_use]
    pub fn build(old: &'a Snapshot, new: &'a Snapshot) -> Self {
        let old = index_endpoints(old);
        let new = index_endpoints(new);
        debug!(
            "Indexed {} old and {} new endpoints",
            old.len(),
            new.len()
        );
        Self { old, new }
    }

    /// Endpoints only present in the old snapshot, in old order.
    pub fn removed(&self) -> impl Iterator<Item = (&str, &'a Endpoint)> + '_ {
        self.old
            .iter()
            .filter(|(id, _)| !self.new.contains_key(*id))
            .map(|(id, ep)| (id.as_str(), *ep))
    }

    /// Endpoints only present in the new snapshot, in new order.
    pub fn added(&self) -> impl Iterator<Item = (&str, &'a Endpoint)> + '_ {
        self.new
            .iter()
            .filter(|(id, _)| !self.old.contains_key(*id))
            .map(|(id, ep)| (id.as_str(), *ep))
    }

    /// Endpoints present in both snapshots, in old order.
    pub fn matched(&self) -> impl Iterator<Item = MatchedEndpoint<'_>> + '_ {
        self.old.iter().filter_map(|(id, old)| {
            self.new.get(id).map(|new| MatchedEndpoint {
                id: id.as_str(),
                old: *old,
                new: *new,
            })
        })
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched().count()
    }
}
