//! Client-side persistent key-value storage.
//!
//! DESIGN
//! ======
//! Mirrors browser local storage: synchronous string-keyed access to JSON
//! values. `FileStore` keeps the whole map in one JSON object file and
//! rewrites it on every mutation; the map is tiny so this stays cheap.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::error::SessionError;

/// Synchronous key-value store holding the persisted session.
pub trait SessionStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: Value) -> Result<(), SessionError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SessionError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        (**self).remove(key)
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store. Lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: Value) -> Self {
        let store = Self::new();
        store.write_entries().insert(key.to_owned(), value);
        store
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Value>> {
        self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
        let entries = self.entries.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SessionError> {
        self.write_entries().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.write_entries().remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Store backed by a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Map<String, Value>, SessionError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            other => Err(SessionError::StoreCorrupt(format!(
                "{} holds {} instead of an object",
                self.path.display(),
                kind_of(&other)
            ))),
        }
    }

    fn save(&self, map: Map<String, Value>) -> Result<(), SessionError> {
        let text = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SessionError> {
        let mut map = self.load()?;
        map.insert(key.to_owned(), value);
        self.save(map)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(map)?;
        }
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
