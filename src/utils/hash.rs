//! Content hashing utilities.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

/// Compute a content hash for arbitrary bytes
#[must_use]
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Fingerprint of a value's canonical JSON encoding.
///
/// `None` when the value fails to serialize; such values never compare equal.
pub fn json_fingerprint<T: Serialize + ?Sized>(value: &T) -> Option<u64> {
    serde_json::to_vec(value).ok().map(|bytes| content_hash(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash() {
        let hash = content_hash(b"GET /users");
        assert_eq!(hash, content_hash(b"GET /users"));
        assert_ne!(hash, content_hash(b"GET /users/{id}"));
    }

    #[test]
    fn test_json_fingerprint_follows_content() {
        let a = vec!["GET /users", "POST /users"];
        let b = vec!["POST /users", "GET /users"];
        assert_eq!(json_fingerprint(&a), json_fingerprint(&a.clone()));
        assert_ne!(json_fingerprint(&a), json_fingerprint(&b));
    }

    #[test]
    fn test_json_fingerprint_unserializable_is_none() {
        // JSON object keys must be strings
        let value: std::collections::BTreeMap<Vec<u8>, u8> = [(vec![1, 2], 3)].into();
        assert_eq!(json_fingerprint(&value), None);
    }
}
