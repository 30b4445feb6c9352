//! Shared utilities.

mod hash;
mod version;

pub use hash::{content_hash, json_fingerprint};
pub use version::{is_major_bump, major_version};
