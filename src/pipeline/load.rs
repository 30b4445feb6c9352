//! Loading snapshots and changelogs from disk.
//!
//! The format follows the file extension: `.json`, `.yaml` or `.yml`.

use crate::error::{ChangelogError, ErrorContext, ParseErrorKind, Result};
use crate::model::{Changelog, Snapshot};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Path literal that stands for an absent snapshot.
pub const ABSENT_SNAPSHOT: &str = "none";

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ChangelogError::parse(
                path.display().to_string(),
                ParseErrorKind::UnknownFormat(ext),
            )),
        }
    }

    /// Decode a document.
    pub fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| ChangelogError::io(path, e))?;
    format
        .decode(&content)
        .with_context(|| path.display().to_string())
}

/// Load a canonical snapshot.
pub fn load_snapshot(path: &Path, quiet: bool) -> Result<Snapshot> {
    let snapshot: Snapshot = read_document(path)?;
    if !quiet {
        info!(
            "Loaded {} {} with {} endpoints and {} types",
            snapshot.source_type,
            snapshot.name,
            snapshot.endpoints.len(),
            snapshot.types.len()
        );
    }
    Ok(snapshot)
}

/// Load a snapshot, treating the literal path `none` as "no snapshot".
pub fn load_optional_snapshot(path: &Path, quiet: bool) -> Result<Option<Snapshot>> {
    if path.as_os_str().eq_ignore_ascii_case(ABSENT_SNAPSHOT) {
        return Ok(None);
    }
    load_snapshot(path, quiet).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChangelogDocument {
    Many(Vec<Changelog>),
    One(Box<Changelog>),
}

/// Load changelogs from one or more files.
///
/// Each file holds a single changelog or an array of them. The result keeps
/// file order; analytics sort by timestamp themselves.
pub fn load_history<P: AsRef<Path>>(paths: &[P], quiet: bool) -> Result<Vec<Changelog>> {
    let mut history = Vec::new();
    for path in paths {
        let path = path.as_ref();
        match read_document::<ChangelogDocument>(path)? {
            ChangelogDocument::Many(changelogs) => history.extend(changelogs),
            ChangelogDocument::One(changelog) => history.push(*changelog),
        }
    }
    if !quiet {
        info!("Loaded {} changelogs from {} files", history.len(), paths.len());
    }
    Ok(history)
}
