//! Decoding wire records into the canonical model.

use serde_json::{Map, Value};

use crate::{
    bundle::{NamedQuery, Query, WireDocument, WireNamedQuery},
    document::{Document, DocumentKey},
    error::Error,
    version::{SnapshotVersion, WireTimestamp},
};

/// Decoding capabilities the converter is parameterized over: resource
/// names to keys, wire documents to domain documents, wire timestamps to
/// snapshot versions.
pub trait BundleSerializer: Send + Sync + 'static {
    /// Decode a full resource name into a document key.
    fn decode_key(&self, name: &str) -> Result<DocumentKey, Error>;

    /// Decode a wire document.
    fn decode_document(
        &self,
        doc: &WireDocument,
        has_local_mutations: bool,
    ) -> Result<Document, Error>;

    /// Decode a wire timestamp.
    fn decode_version(&self, time: &WireTimestamp) -> Result<SnapshotVersion, Error>;

    /// Decode a named query.
    fn decode_named_query(&self, named: &WireNamedQuery) -> Result<NamedQuery, Error>;
}

/// Default serializer, bound to a single database.
///
/// Resource names must live under
/// `projects/{project}/databases/{database}/documents`; anything else is
/// rejected as malformed.
#[derive(Debug, Clone)]
pub struct RemoteSerializer {
    project_id: String,
    database_id: String,
}

impl RemoteSerializer {
    pub fn new(project_id: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: database_id.into(),
        }
    }

    /// Strip the database prefix off a resource name, leaving the local
    /// path segments.
    fn resource_path(&self, name: &str) -> Result<Vec<String>, Error> {
        let segments: Vec<&str> = name.split('/').collect();
        if segments.len() < 5
            || segments[0] != "projects"
            || segments[2] != "databases"
            || segments[4] != "documents"
        {
            return Err(Error::InvalidResourceName(name.to_string()));
        }
        if segments[1] != self.project_id || segments[3] != self.database_id {
            return Err(Error::InvalidResourceName(format!(
                "{name} does not belong to projects/{}/databases/{}",
                self.project_id, self.database_id
            )));
        }
        Ok(segments[5..].iter().map(|s| s.to_string()).collect())
    }

    /// Decode one proto-JSON field value into a plain JSON value.
    fn decode_value(&self, value: &Value) -> Result<Value, Error> {
        let tagged = value.as_object().ok_or_else(|| {
            Error::MalformedDocument(format!("field value is not a tagged object: {value}"))
        })?;
        let (tag, inner) = tagged.iter().next().ok_or_else(|| {
            Error::MalformedDocument("field value carries no type tag".to_string())
        })?;

        match tag.as_str() {
            "nullValue" => Ok(Value::Null),
            "booleanValue" | "doubleValue" | "stringValue" => Ok(inner.clone()),
            "integerValue" => match inner {
                Value::Number(_) => Ok(inner.clone()),
                Value::String(text) => text
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| Error::MalformedDocument(format!("bad integer: {text}"))),
                _ => Err(Error::MalformedDocument(format!("bad integer: {inner}"))),
            },
            "timestampValue" => {
                let time: WireTimestamp = serde_json::from_value(inner.clone())
                    .map_err(|e| Error::MalformedDocument(format!("bad timestamp: {e}")))?;
                Ok(Value::String(SnapshotVersion::from_wire(&time)?.to_string()))
            }
            "mapValue" => {
                let fields = inner
                    .get("fields")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                Ok(Value::Object(self.decode_fields(&fields)?))
            }
            "arrayValue" => {
                let values = inner.get("values").and_then(Value::as_array);
                let decoded = values
                    .map(|values| {
                        values
                            .iter()
                            .map(|v| self.decode_value(v))
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .transpose()?
                    .unwrap_or_default();
                Ok(Value::Array(decoded))
            }
            other => Err(Error::MalformedDocument(format!(
                "unknown value tag: {other}"
            ))),
        }
    }

    fn decode_fields(&self, fields: &Map<String, Value>) -> Result<Map<String, Value>, Error> {
        fields
            .iter()
            .map(|(name, value)| Ok((name.clone(), self.decode_value(value)?)))
            .collect()
    }
}

impl BundleSerializer for RemoteSerializer {
    fn decode_key(&self, name: &str) -> Result<DocumentKey, Error> {
        DocumentKey::from_segments(self.resource_path(name)?)
    }

    fn decode_document(
        &self,
        doc: &WireDocument,
        has_local_mutations: bool,
    ) -> Result<Document, Error> {
        Ok(Document {
            key: self.decode_key(&doc.name)?,
            version: self.decode_version(&doc.update_time)?,
            fields: self.decode_fields(&doc.fields)?,
            has_local_mutations,
        })
    }

    fn decode_version(&self, time: &WireTimestamp) -> Result<SnapshotVersion, Error> {
        SnapshotVersion::from_wire(time)
    }

    fn decode_named_query(&self, named: &WireNamedQuery) -> Result<NamedQuery, Error> {
        let parent = self.resource_path(&named.bundled_query.parent)?;
        let structured = &named.bundled_query.structured_query;
        let selector = match structured.from.as_slice() {
            [selector] => selector,
            _ => {
                return Err(Error::InvalidQuery(format!(
                    "expected exactly one collection selector in {}",
                    named.name
                )));
            }
        };

        let query = if selector.all_descendants {
            Query {
                path: parent,
                collection_group: Some(selector.collection_id.clone()),
                limit: structured.limit,
            }
        } else {
            let mut path = parent;
            path.push(selector.collection_id.clone());
            Query {
                path,
                collection_group: None,
                limit: structured.limit,
            }
        };

        Ok(NamedQuery {
            name: named.name.clone(),
            query,
            read_time: self.decode_version(&named.read_time)?,
        })
    }
}
