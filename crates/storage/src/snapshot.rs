use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Result, StorageError};

/// Schema version written into every snapshot.
pub const SNAPSHOT_SCHEMA: u32 = 1;

/// A persisted copy of a store's items at one point in time.
///
/// This is the raw value handed to a [`KeyValueStore`](crate::KeyValueStore):
/// the store's full item sequence plus enough metadata to reject data
/// written by an incompatible build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// Schema version of the encoding.
    pub schema: u32,

    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,

    /// The persisted items.
    pub items: T,
}

impl<T> Snapshot<T> {
    /// Creates a snapshot of `items` stamped with the current time.
    pub fn new(items: T) -> Self {
        Self {
            schema: SNAPSHOT_SCHEMA,
            saved_at: Utc::now(),
            items,
        }
    }

    /// Consumes the snapshot and returns its items.
    pub fn into_items(self) -> T {
        self.items
    }
}

impl<T: Serialize> Snapshot<T> {
    /// Encodes the snapshot as JSON.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: DeserializeOwned> Snapshot<T> {
    /// Decodes a snapshot, rejecting unknown schema versions.
    pub fn decode(raw: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(raw)?;
        if snapshot.schema != SNAPSHOT_SCHEMA {
            return Err(StorageError::UnsupportedSchema {
                expected: SNAPSHOT_SCHEMA,
                found: snapshot.schema,
            });
        }
        Ok(snapshot)
    }
}
