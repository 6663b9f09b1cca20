//! Key-value persistence for the publisher's state.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StateWriteError;

/// Minimal synchronous key-value store.
///
/// Single writer only: nothing here guards against two processes sharing
/// the same backing file.
pub trait StateStore {
    /// Stored value, or an empty string when the key is absent
    fn get(&self, key: &str) -> String;

    /// Store a value.
    ///
    /// The new value is visible to `get` even when the returned error says
    /// the durable copy could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StateWriteError>;
}

/// Process-local store, nothing survives a restart
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    values: HashMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateWriteError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a pretty-printed JSON object on disk.
///
/// The whole map is rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStateStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStateStore {
    /// Load `path` if it exists, otherwise start empty.
    ///
    /// An unreadable or corrupt file is logged and treated as empty; the
    /// next successful write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::error!("Failed to parse state file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No state file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                tracing::error!("Failed to read state file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StateWriteError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json).map_err(|source| StateWriteError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl StateStore for JsonFileStateStore {
    fn get(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateWriteError> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }

        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
