//! Versioned envelope for persisted collections.
//!
//! Every key is written as `{"version": 1, "items": [...]}`. Bare arrays (the
//! un-versioned shape) are still accepted on read. Records are validated one
//! by one: a bad record is dropped, a bad blob reads as empty.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use super::KvStore;
use crate::error::StorageError;

pub const SCHEMA_VERSION: u64 = 1;

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u64,
    items: &'a [T],
}

/// Encode a collection into its versioned envelope.
pub fn encode<T: Serialize>(key: &str, items: &[T]) -> Result<String, StorageError> {
    serde_json::to_string(&Envelope {
        version: SCHEMA_VERSION,
        items,
    })
    .map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })
}

/// Decode a persisted collection. Never fails; see module docs.
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Vec<T> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(key, error = %e, "unparsable persisted value, treating as empty");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => {
            let version = obj.get("version").and_then(Value::as_u64);
            if version != Some(SCHEMA_VERSION) {
                warn!(key, ?version, "unsupported schema version, treating as empty");
                return Vec::new();
            }
            match obj.remove("items") {
                Some(Value::Array(items)) => items,
                _ => {
                    warn!(key, "envelope without items array, treating as empty");
                    return Vec::new();
                }
            }
        }
        Value::Null => Vec::new(),
        _ => {
            warn!(key, "persisted value is not a collection, treating as empty");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key, index = idx, error = %e, "dropping invalid record");
                None
            }
        })
        .collect()
}

/// Read and decode `key`. Port failures are logged and read as empty.
pub fn load<T, S>(port: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match port.get(key) {
        Ok(Some(raw)) => decode(key, &raw),
        Ok(None) => Vec::new(),
        Err(e) => {
            error!(key, error = %e, "failed to read persisted value");
            Vec::new()
        }
    }
}

/// Like [`load`], but distinguishes a key that was never written (`None`).
pub fn load_opt<T, S>(port: &S, key: &str) -> Option<Vec<T>>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match port.get(key) {
        Ok(Some(raw)) => Some(decode(key, &raw)),
        Ok(None) => None,
        Err(e) => {
            error!(key, error = %e, "failed to read persisted value");
            None
        }
    }
}

/// Encode and write `items` under `key`.
pub fn save<T, S>(port: &mut S, key: &str, items: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
    S: KvStore + ?Sized,
{
    let raw = encode(key, items)?;
    port.set(key, &raw)
}
