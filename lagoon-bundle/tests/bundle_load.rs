//! End-to-end conversion of a parsed bundle into canonical records.

use lagoon_bundle::{
    BundleConverter, BundleMetadata, BundledDocumentMetadata, BundledDocuments, MaybeDocument,
    RemoteSerializer, SnapshotVersion, WireDocument, WireNamedQuery,
};
use serde_json::json;

fn converter() -> BundleConverter<RemoteSerializer> {
    BundleConverter::new(RemoteSerializer::new("garden-app", "(default)"))
}

#[test]
fn converts_a_complete_bundle() {
    let converter = converter();

    let metadata: BundleMetadata = serde_json::from_value(json!({
        "id": "nightly-snapshot",
        "version": 1,
        "createTime": {"seconds": 1000, "nanos": 0},
        "totalDocuments": 2
    }))
    .unwrap();

    let named: WireNamedQuery = serde_json::from_value(json!({
        "name": "open-gardens",
        "bundledQuery": {
            "parent": "projects/garden-app/databases/(default)/documents",
            "structuredQuery": {"from": [{"collectionId": "gardens"}], "limit": 20}
        },
        "readTime": {"seconds": 1000, "nanos": 0}
    }))
    .unwrap();

    let documents: BundledDocuments = vec![
        (
            serde_json::from_value::<BundledDocumentMetadata>(json!({
                "name": "projects/garden-app/databases/(default)/documents/gardens/g1",
                "readTime": {"seconds": 1000, "nanos": 0},
                "exists": true
            }))
            .unwrap(),
            Some(
                serde_json::from_value::<WireDocument>(json!({
                    "name": "projects/garden-app/databases/(default)/documents/gardens/g1",
                    "fields": {"title": {"stringValue": "Rose garden"}},
                    "updateTime": {"seconds": 900, "nanos": 0}
                }))
                .unwrap(),
            ),
        ),
        (
            serde_json::from_value::<BundledDocumentMetadata>(json!({
                "name": "projects/garden-app/databases/(default)/documents/gardens/g2",
                "readTime": {"seconds": 1000, "nanos": 0}
            }))
            .unwrap(),
            None,
        ),
    ];

    let bundle = converter.to_bundle(&metadata).unwrap();
    assert_eq!(bundle.id, "nightly-snapshot");
    assert_eq!(bundle.create_time, SnapshotVersion::new(1000, 0));

    let query = converter.to_named_query(&named).unwrap();
    assert_eq!(query.name, "open-gardens");
    assert_eq!(query.read_time, SnapshotVersion::new(1000, 0));

    let converted: Vec<MaybeDocument> = documents
        .iter()
        .map(|(metadata, doc)| converter.to_maybe_document(metadata, doc.as_ref()).unwrap())
        .collect();

    assert!(converted[0].exists());
    assert_eq!(converted[0].key().to_string(), "gardens/g1");
    assert_eq!(converted[0].version(), SnapshotVersion::new(900, 0));

    assert!(!converted[1].exists());
    assert_eq!(converted[1].key().to_string(), "gardens/g2");
    assert_eq!(converted[1].version(), SnapshotVersion::new(1000, 0));
}

#[test]
fn client_authored_bundle_gets_minimum_create_time() {
    let metadata: BundleMetadata =
        serde_json::from_value(json!({"id": "local", "version": 1})).unwrap();

    let bundle = converter().to_bundle(&metadata).unwrap();
    assert_eq!(bundle.create_time, SnapshotVersion::MIN);
}
