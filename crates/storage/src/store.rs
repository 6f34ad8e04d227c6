use std::sync::Arc;

use crate::{Result, StorageError};

/// Key-value persistence backend for raw snapshots.
///
/// Implementations only move opaque strings; encoding and the handling of
/// malformed data belong to the caller. All implementations must be
/// thread-safe (Send + Sync).
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been written for the key yet.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the value stored under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Validates a storage key.
///
/// Keys must be non-empty and consist of ASCII alphanumerics, `-`, `_` or
/// `.`, and must not start with a `.`, so that every backend can map them
/// onto a file name.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
