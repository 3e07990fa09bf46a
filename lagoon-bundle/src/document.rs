//! The canonical document model
//!
//! Remote documents land in the cache in one of two states: present with
//! contents as of some snapshot version, or confirmed absent as of one.
//! [`MaybeDocument`] is that pair of states; [`DocumentKey`] names the
//! document either way.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::Error, version::SnapshotVersion};

/// Slash-separated path identifying a single document.
///
/// Documents always live inside a collection, so the segment count is even
/// and every segment is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    segments: Vec<String>,
}

impl DocumentKey {
    pub fn from_segments(segments: Vec<String>) -> Result<Self, Error> {
        if segments.is_empty() || segments.len() % 2 != 0 {
            return Err(Error::InvalidResourceName(format!(
                "document paths must have an even number of segments: {}",
                segments.join("/")
            )));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidResourceName(format!(
                "empty path segment in {}",
                segments.join("/")
            )));
        }
        Ok(Self { segments })
    }

    pub fn from_path(path: &str) -> Result<Self, Error> {
        Self::from_segments(path.split('/').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path of the collection containing this document.
    pub fn collection_path(&self) -> String {
        self.segments[..self.segments.len() - 1].join("/")
    }

    /// Final path segment.
    pub fn document_id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// A document known to exist, with its contents at `version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub key: DocumentKey,
    pub version: SnapshotVersion,
    pub fields: Map<String, Value>,

    /// Whether local mutations are still pending upload for this document.
    pub has_local_mutations: bool,
}

/// A document confirmed absent as of `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoDocument {
    pub key: DocumentKey,
    pub version: SnapshotVersion,
}

/// The existing-or-absent state of one remote document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaybeDocument {
    Existing(Document),
    Missing(NoDocument),
}

impl MaybeDocument {
    pub fn key(&self) -> &DocumentKey {
        match self {
            MaybeDocument::Existing(doc) => &doc.key,
            MaybeDocument::Missing(doc) => &doc.key,
        }
    }

    pub fn version(&self) -> SnapshotVersion {
        match self {
            MaybeDocument::Existing(doc) => doc.version,
            MaybeDocument::Missing(doc) => doc.version,
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, MaybeDocument::Existing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key_from_path() {
        let key = DocumentKey::from_path("gardens/g1/plots/p2").unwrap();
        assert_eq!(key.segments().len(), 4);
        assert_eq!(key.collection_path(), "gardens/g1/plots");
        assert_eq!(key.document_id(), "p2");
        assert_eq!(key.to_string(), "gardens/g1/plots/p2");
    }

    #[test]
    fn test_document_key_rejects_odd_paths() {
        assert!(matches!(
            DocumentKey::from_path("gardens"),
            Err(Error::InvalidResourceName(_))
        ));
        assert!(matches!(
            DocumentKey::from_path("gardens/g1/plots"),
            Err(Error::InvalidResourceName(_))
        ));
    }

    #[test]
    fn test_document_key_rejects_empty_segments() {
        assert!(matches!(
            DocumentKey::from_path("gardens//plots/p1"),
            Err(Error::InvalidResourceName(_))
        ));
    }

    #[test]
    fn test_maybe_document_accessors() {
        let key = DocumentKey::from_path("gardens/g1").unwrap();
        let missing = MaybeDocument::Missing(NoDocument {
            key: key.clone(),
            version: SnapshotVersion::new(3, 0),
        });

        assert_eq!(missing.key(), &key);
        assert_eq!(missing.version(), SnapshotVersion::new(3, 0));
        assert!(!missing.exists());
    }
}
