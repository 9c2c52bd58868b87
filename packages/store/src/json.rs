//! JSON blob helpers over a [`KeyValueStore`].
//!
//! Reads never fail: an absent key, a corrupted blob or an unreadable backend
//! all degrade to `T::default()` after logging. A malformed blob must never
//! take the client down; it is treated as absent data.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kv::{KeyValueStore, StoreError};

/// Read and decode the JSON blob at `key`, falling back to `T::default()`.
pub fn read_json<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    try_read_json(store, key).unwrap_or_default()
}

/// Read and decode the JSON blob at `key`, or `None` if it is absent or unusable.
pub fn try_read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::error!("Failed to read {}: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding malformed blob at {}: {}", key, e);
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_absent_key_reads_default() {
        let store = MemoryStore::new();
        let emails: Vec<String> = read_json(&store, "emails");
        assert!(emails.is_empty());
        assert!(try_read_json::<Vec<String>, _>(&store, "emails").is_none());
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        write_json(&store, "emails", &vec!["a@x.com".to_string()]).unwrap();

        assert_eq!(store.get("emails").unwrap().as_deref(), Some(r#"["a@x.com"]"#));
        let emails: Vec<String> = read_json(&store, "emails");
        assert_eq!(emails, vec!["a@x.com".to_string()]);
    }

    #[test]
    fn test_malformed_blob_degrades_to_default() {
        let store = MemoryStore::new();
        store.set("emails", "{not json").unwrap();

        let emails: Vec<String> = read_json(&store, "emails");
        assert!(emails.is_empty());

        // Wrong shape is treated the same way
        store.set("emails", r#"{"a":1}"#).unwrap();
        let emails: Vec<String> = read_json(&store, "emails");
        assert!(emails.is_empty());
    }
}
