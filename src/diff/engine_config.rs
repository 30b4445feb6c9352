//! Configuration types for the diff engine.

/// Default path similarity for rename detection.
pub const DEFAULT_RENAME_SIMILARITY: f64 = 0.8;

/// Detection of endpoints that moved to a new path.
///
/// A removed endpoint is paired with the most similar added endpoint that uses
/// the same method. The pairing only adds a migration suggestion; the removal
/// stays breaking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenameDetection {
    pub enabled: bool,
    /// Minimum normalized Levenshtein similarity between paths (0.0-1.0)
    pub min_similarity: f64,
}

impl Default for RenameDetection {
    fn default() -> Self {
        Self {
            enabled: true,
            min_similarity: DEFAULT_RENAME_SIMILARITY,
        }
    }
}

impl RenameDetection {
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            min_similarity: DEFAULT_RENAME_SIMILARITY,
        }
    }

    /// Similarity between two paths if it clears the threshold.
    #[must_use]
    pub fn similarity(&self, old_path: &str, new_path: &str) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        let score = strsim::normalized_levenshtein(old_path, new_path);
        (score >= self.min_similarity).then_some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_threshold() {
        let rename = RenameDetection::default();
        assert!(rename.similarity("/v1/users/{id}", "/v2/users/{id}").is_some());
        assert!(rename.similarity("/users", "/orders/items").is_none());
    }

    #[test]
    fn test_disabled_never_matches() {
        assert!(RenameDetection::disabled().similarity("/a", "/a").is_none());
    }
}
