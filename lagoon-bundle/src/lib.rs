//! Bundle conversion for the lagoon client SDK
//!
//! A bundle is a serialized snapshot of remote documents and named queries
//! used for offline seeding and initial loads. This crate turns bundled
//! wire records into the canonical versioned-document model the sync cache
//! stores: [`MaybeDocument`] for per-document state, [`Bundle`] and
//! [`NamedQuery`] for bundle-level metadata.
//!
//! Transport and framing are out of scope — callers hand in records that
//! are already parsed. The [`BundleConverter`] performs no I/O and holds
//! no mutable state, so one converter can serve any number of concurrent
//! readers. Decoding itself is pluggable through [`BundleSerializer`],
//! with [`RemoteSerializer`] as the database-bound default.

pub mod bundle;
pub mod converter;
pub mod document;
pub mod error;
pub mod serializer;
pub mod version;

pub use bundle::{
    Bundle, BundleMetadata, BundledDocumentMetadata, BundledDocuments, NamedQuery, Query,
    WireBundledQuery, WireCollectionSelector, WireDocument, WireNamedQuery, WireStructuredQuery,
};
pub use converter::BundleConverter;
pub use document::{Document, DocumentKey, MaybeDocument, NoDocument};
pub use error::Error;
pub use serializer::{BundleSerializer, RemoteSerializer};
pub use version::{SnapshotVersion, WireTimestamp};
