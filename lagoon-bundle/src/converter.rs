//! Converting bundled records into the canonical document model.

use crate::{
    bundle::{
        Bundle, BundleMetadata, BundledDocumentMetadata, NamedQuery, WireDocument, WireNamedQuery,
    },
    document::{DocumentKey, MaybeDocument, NoDocument},
    error::Error,
    serializer::BundleSerializer,
    version::{SnapshotVersion, WireTimestamp},
};

/// Stateless transform from bundled wire records to canonical documents.
///
/// Constructed once over a serializer and performs no I/O, so a single
/// converter can be shared across any number of concurrent readers.
pub struct BundleConverter<S: BundleSerializer> {
    serializer: S,
}

impl<S: BundleSerializer> BundleConverter<S> {
    pub fn new(serializer: S) -> Self {
        Self { serializer }
    }

    /// Decode a document resource name.
    pub fn to_document_key(&self, name: &str) -> Result<DocumentKey, Error> {
        self.serializer.decode_key(name)
    }

    /// Reconcile one bundled document with its metadata.
    ///
    /// An existing document decodes to [`MaybeDocument::Existing`] with no
    /// pending local mutations; a deleted one becomes
    /// [`MaybeDocument::Missing`] keyed by the metadata's name and stamped
    /// with its read time.
    ///
    /// # Panics
    ///
    /// Panics when the metadata declares the document exists but no payload
    /// accompanies it. That combination can only come out of a corrupt
    /// bundle producer and is not a recoverable runtime condition.
    pub fn to_maybe_document(
        &self,
        metadata: &BundledDocumentMetadata,
        doc: Option<&WireDocument>,
    ) -> Result<MaybeDocument, Error> {
        if metadata.exists {
            let doc = match doc {
                Some(doc) => doc,
                None => panic!(
                    "bundled document {} is marked as existing but carries no payload",
                    metadata.name
                ),
            };
            Ok(MaybeDocument::Existing(
                self.serializer.decode_document(doc, false)?,
            ))
        } else {
            Ok(MaybeDocument::Missing(NoDocument {
                key: self.to_document_key(&metadata.name)?,
                version: self.to_snapshot_version(&metadata.read_time)?,
            }))
        }
    }

    /// Decode a wire timestamp.
    pub fn to_snapshot_version(&self, time: &WireTimestamp) -> Result<SnapshotVersion, Error> {
        self.serializer.decode_version(time)
    }

    /// Decode bundle metadata, defaulting the creation time for bundles
    /// not authored by a server.
    pub fn to_bundle(&self, metadata: &BundleMetadata) -> Result<Bundle, Error> {
        let create_time = match &metadata.create_time {
            Some(time) => self.to_snapshot_version(time)?,
            None => SnapshotVersion::MIN,
        };

        tracing::debug!(bundle.id = %metadata.id, "Decoded bundle metadata");

        Ok(Bundle {
            id: metadata.id.clone(),
            version: metadata.version,
            create_time,
        })
    }

    /// Decode a named query.
    pub fn to_named_query(&self, named: &WireNamedQuery) -> Result<NamedQuery, Error> {
        self.serializer.decode_named_query(named)
    }
}
