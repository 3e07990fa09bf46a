//! Snapshot versions and their wire form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A point in time as it appears on the wire: either an RFC 3339 string or
/// an exploded seconds/nanos pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTimestamp {
    Rfc3339(String),
    Proto {
        seconds: i64,
        #[serde(default)]
        nanos: u32,
    },
}

/// A totally ordered timestamp marking when a document state was observed.
///
/// [`SnapshotVersion::MIN`] is the sentinel for "unknown/never": a version
/// no observed state can sort below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotVersion {
    seconds: i64,
    nanos: u32,
}

impl SnapshotVersion {
    pub const MIN: SnapshotVersion = SnapshotVersion {
        seconds: 0,
        nanos: 0,
    };

    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Decode a wire timestamp. Decoding is pure: the same wire value
    /// always yields the same version.
    pub fn from_wire(time: &WireTimestamp) -> Result<Self, Error> {
        match time {
            WireTimestamp::Proto { seconds, nanos } => Ok(Self::new(*seconds, *nanos)),
            WireTimestamp::Rfc3339(text) => {
                let parsed: DateTime<Utc> = text
                    .parse()
                    .map_err(|e| Error::InvalidTimestamp(format!("{text}: {e}")))?;
                Ok(Self::new(parsed.timestamp(), parsed.timestamp_subsec_nanos()))
            }
        }
    }
}

impl std::fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}
