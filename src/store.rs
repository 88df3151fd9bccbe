//! Persistence boundary
//!
//! A synchronous key-value surface supplied by the host application, plus two
//! ready-made implementations: an in-memory map and a JSON file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Environment variable overriding the [`FileStore`] location.
pub const STORE_PATH_ENV: &str = "INPUT_ASSIST_STORE_PATH";

const DEFAULT_STORE_PATH: &str = "./assets/input-assist.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to access store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed store contents: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage used to persist field histories.
///
/// `get` returns the previously stored value for `key`, or `None`.
/// `set` overwrites any prior value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

/// Process-local store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns the store file path.
///
/// Priority:
/// 1. Environment variable `INPUT_ASSIST_STORE_PATH`
/// 2. Default path `./assets/input-assist.json`
pub fn get_store_path() -> PathBuf {
    std::env::var(STORE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH))
}

/// Store persisted as a single JSON object on disk.
///
/// The whole key space is kept in memory and rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at the path given by [`get_store_path`].
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(get_store_path())
    }

    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store; it is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - File is not a JSON object of strings
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str::<HashMap<String, String>>(&content).inspect_err(|_e| {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Store load FAILED for {:?}: {}", path, _e);
                })?
            }
        } else {
            HashMap::new()
        };

        #[cfg(feature = "tracing")]
        tracing::info!("Store opened: {} keys from {:?}", entries.len(), path);

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                return Err(StoreError::FileNotFound(parent.to_path_buf()));
            }
        }

        let serialized = serde_json::to_string(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        let previous = guard.insert(key.to_string(), value.to_string());

        if let Err(e) = self.flush(&guard) {
            // keep memory and disk in agreement
            match previous {
                Some(old) => guard.insert(key.to_string(), old),
                None => guard.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
