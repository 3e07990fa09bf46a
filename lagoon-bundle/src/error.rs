use thiserror::Error;

/// Decoding failures surfaced while converting bundled records.
///
/// These cover malformed wire data only. A bundled document marked as
/// existing without an accompanying payload is producer-side corruption
/// and panics instead of producing a variant here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid resource name: {0}")]
    InvalidResourceName(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::InvalidResourceName("gardens/g1".to_string());
        assert_eq!(error.to_string(), "Invalid resource name: gardens/g1");

        let error = Error::InvalidTimestamp("not-a-date".to_string());
        assert_eq!(error.to_string(), "Invalid timestamp: not-a-date");

        let error = Error::MalformedDocument("unknown value tag".to_string());
        assert_eq!(error.to_string(), "Malformed document: unknown value tag");
    }
}
