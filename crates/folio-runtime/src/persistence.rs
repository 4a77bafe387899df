//! Key/value persistence for user preferences.
//!
//! The browser's `localStorage` is modelled by [`PreferenceStore`]: a
//! string-to-string map that may fail on any call. Consumers treat failure
//! as "no stored value" and carry on.
//!
//! # Backends
//!
//! - [`MemoryStore`]: in-memory, for tests and ephemeral sessions.
//! - [`FileStore`]: JSON file with atomic writes (`file-store` feature).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Returned; caller keeps in-memory state |
//! | `StorageError::Serialization` | Unparseable JSON | Returned from `get`/`set` |
//! | `StorageError::Corruption` | Lock poisoned, bad format version | Returned |
//! | Missing key | First visit | `Ok(None)` |

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during preference storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    Serialization(String),
    /// Store contents or internal state are unusable.
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialization(_) | StorageError::Corruption(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ─────────────────────────────────────────────────────────────────────────────
// Store Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A string key/value store.
///
/// Implementations must be thread-safe so one store can back several
/// services.
pub trait PreferenceStore: Send + Sync {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Remove every key.
    fn clear(&self) -> StorageResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Corruption("lock poisoned".into())
}

impl PreferenceStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self.entries.read().map_err(poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self.entries.write().map_err(poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut guard = self.entries.write().map_err(poisoned)?;
        guard.remove(key);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        let mut guard = self.entries.write().map_err(poisoned)?;
        guard.clear();
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Store (requires file-store feature)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "file-store")]
mod file_store {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Serialize, Deserialize)]
    struct PreferenceFile {
        format_version: u32,
        entries: BTreeMap<String, String>,
    }

    impl PreferenceFile {
        const FORMAT_VERSION: u32 = 1;

        fn new() -> Self {
            Self {
                format_version: Self::FORMAT_VERSION,
                entries: BTreeMap::new(),
            }
        }
    }

    /// JSON file store.
    ///
    /// ```json
    /// { "format_version": 1, "entries": { "theme": "dark" } }
    /// ```
    ///
    /// Every mutation rewrites the file via `{path}.tmp` + rename so a crash
    /// never leaves a half-written file behind.
    pub struct FileStore {
        path: PathBuf,
        // Serializes read-modify-write cycles within this process.
        write_lock: Mutex<()>,
    }

    impl FileStore {
        /// Store at `path`; the file is created on first write.
        #[must_use]
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
                write_lock: Mutex::new(()),
            }
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut tmp = self.path.clone();
            tmp.set_extension("json.tmp");
            tmp
        }

        fn load(&self) -> StorageResult<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let reader = BufReader::new(File::open(&self.path)?);
            let file: PreferenceFile = serde_json::from_reader(reader).map_err(|e| {
                StorageError::Serialization(format!("failed to parse preference file: {e}"))
            })?;
            if file.format_version != PreferenceFile::FORMAT_VERSION {
                return Err(StorageError::Corruption(format!(
                    "unsupported format version {}",
                    file.format_version
                )));
            }
            Ok(file.entries)
        }

        fn save(&self, entries: BTreeMap<String, String>) -> StorageResult<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = PreferenceFile::new();
            let count = entries.len();
            file.entries = entries;

            let tmp_path = self.temp_path();
            {
                let mut writer = BufWriter::new(File::create(&tmp_path)?);
                serde_json::to_writer_pretty(&mut writer, &file).map_err(|e| {
                    StorageError::Serialization(format!("failed to serialize preferences: {e}"))
                })?;
                writer.flush()?;
                writer.get_ref().sync_all()?;
            }
            fs::rename(&tmp_path, &self.path)?;

            tracing::debug!(path = %self.path.display(), entries = count, "saved preferences");
            Ok(())
        }

        fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> StorageResult<()> {
            let _guard = self.write_lock.lock().map_err(poisoned)?;
            let mut entries = self.load()?;
            f(&mut entries);
            self.save(entries)
        }
    }

    impl PreferenceStore for FileStore {
        fn name(&self) -> &str {
            "FileStore"
        }

        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Ok(self.load()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.update(|entries| {
                entries.insert(key.to_string(), value.to_string());
            })
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.update(|entries| {
                entries.remove(key);
            })
        }

        fn clear(&self) -> StorageResult<()> {
            let _guard = self.write_lock.lock().map_err(poisoned)?;
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            Ok(())
        }
    }

    impl fmt::Debug for FileStore {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("FileStore").field("path", &self.path).finish()
        }
    }
}

#[cfg(feature = "file-store")]
pub use file_store::FileStore;
