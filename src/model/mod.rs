//! Canonical data structures for format-agnostic API comparison.
//!
//! [`Snapshot`] is the normalized input every format parser produces;
//! [`Changelog`] and its parts are the structured output of the diff engine.
//! Every type here is a plain value: built once, never mutated after hand-off.

mod changelog;
mod snapshot;

pub use changelog::*;
pub use snapshot::*;
