//! Session-scoped key-value storage with JSON-encoded values.
//!
//! # Design
//! `SessionStore` is the raw string store the host provides (a browser
//! session store, or `MemorySessionStore` anywhere else). `Storage` layers
//! JSON serialization on top and is what the rest of the crate talks to.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StorageError;

/// Raw string key-value store scoped to one session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// In-process session store; contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

/// Typed JSON access over a `SessionStore`.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn SessionStore>,
}

impl Storage {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A storage backed by a fresh `MemorySessionStore`.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Returns `Ok(None)` when `key` was never set.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Parse {
                key: key.to_string(),
                source,
            })
    }

    /// Stores `value` as JSON. An empty key or a `None` value is a no-op.
    pub fn set_item<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: Option<&T>,
    ) -> Result<(), StorageError> {
        let Some(value) = value else {
            return Ok(());
        };
        if key.is_empty() {
            return Ok(());
        }
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, raw);
        Ok(())
    }

    pub fn remove_item(&self, key: &str) {
        self.store.remove(key);
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    /// Looks up a token, treating `null`, `""`, `false` and `0` as absent.
    pub fn token(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.get_item::<Value>(key)?.filter(is_truthy))
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
