//! Bundle records: the wire shapes a bundle is made of and the canonical
//! forms the cache stores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::version::{SnapshotVersion, WireTimestamp};

/// Metadata describing a bundle, as stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,

    /// Format version of the bundle.
    pub version: u32,

    /// Snapshot version of the bundle when it was authored by a server,
    /// [`SnapshotVersion::MIN`] otherwise.
    pub create_time: SnapshotVersion,
}

/// The query a named query resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Path the query runs under. For collection queries this ends in the
    /// collection id; for collection-group queries it is the parent path.
    pub path: Vec<String>,

    /// Collection-group id, set for all-descendants queries.
    pub collection_group: Option<String>,

    pub limit: Option<i32>,
}

/// A query saved under a name, with the time its results were captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedQuery {
    pub name: String,
    pub query: Query,
    pub read_time: SnapshotVersion,
}

/// Wire metadata for one bundled document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundledDocumentMetadata {
    /// Full resource name of the document.
    pub name: String,

    /// When this document state was read.
    pub read_time: WireTimestamp,

    /// Whether the document existed at `read_time`.
    #[serde(default)]
    pub exists: bool,
}

/// Wire metadata for a whole bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleMetadata {
    pub id: String,
    pub version: u32,

    /// Absent for bundles not authored by a server.
    #[serde(default)]
    pub create_time: Option<WireTimestamp>,

    #[serde(default)]
    pub total_documents: Option<u32>,

    #[serde(default)]
    pub total_bytes: Option<u64>,
}

/// A document as it appears inside a bundle: proto-JSON field values under
/// a full resource name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDocument {
    pub name: String,

    #[serde(default)]
    pub fields: Map<String, Value>,

    pub update_time: WireTimestamp,
}

/// A named query as it appears inside a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireNamedQuery {
    pub name: String,
    pub bundled_query: WireBundledQuery,
    pub read_time: WireTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireBundledQuery {
    /// Resource name of the path the query runs under.
    pub parent: String,

    #[serde(default)]
    pub structured_query: WireStructuredQuery,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireStructuredQuery {
    pub from: Vec<WireCollectionSelector>,
    pub limit: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCollectionSelector {
    pub collection_id: String,

    #[serde(default)]
    pub all_descendants: bool,
}

/// Document payloads paired with their metadata, in bundle order. The
/// payload is absent for documents recorded as deleted.
pub type BundledDocuments = Vec<(BundledDocumentMetadata, Option<WireDocument>)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_document_metadata_exists_defaults_to_false() {
        let metadata: BundledDocumentMetadata = serde_json::from_str(
            r#"{"name": "projects/p/databases/d/documents/gardens/g1", "readTime": {"seconds": 1, "nanos": 0}}"#,
        )
        .unwrap();

        assert!(!metadata.exists);
    }

    #[test]
    fn test_bundle_metadata_create_time_is_optional() {
        let metadata: BundleMetadata =
            serde_json::from_str(r#"{"id": "bundle-1", "version": 1}"#).unwrap();

        assert_eq!(metadata.id, "bundle-1");
        assert_eq!(metadata.create_time, None);
        assert_eq!(metadata.total_documents, None);
    }

    #[test]
    fn test_wire_named_query_deserializes_camel_case() {
        let named: WireNamedQuery = serde_json::from_str(
            r#"{
                "name": "recent-gardens",
                "bundledQuery": {
                    "parent": "projects/p/databases/d/documents",
                    "structuredQuery": {
                        "from": [{"collectionId": "gardens"}],
                        "limit": 10
                    }
                },
                "readTime": "2021-03-15T10:30:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(named.name, "recent-gardens");
        assert_eq!(named.bundled_query.structured_query.limit, Some(10));
        assert_eq!(
            named.bundled_query.structured_query.from[0].collection_id,
            "gardens"
        );
        assert!(!named.bundled_query.structured_query.from[0].all_descendants);
    }
}
