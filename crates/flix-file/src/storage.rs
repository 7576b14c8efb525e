//! Filesystem key-value storage.
//!
//! ## Directory Structure
//!
//! ```text
//! $ROOT/storage/
//! ├── .lock
//! ├── contentModifications.json
//! └── currentUser.json
//! ```
//!
//! Every process that opens the same root shares the same values, the way
//! browser tabs on one origin share local storage. Writes take an exclusive
//! lock on `.lock` and replace the value file atomically, so a reader
//! never observes a half-written value.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use fs2::FileExt;
use tracing::{debug, instrument};

use flix_core::Result;
use flix_core::error::{InvalidInputError, StorageError};
use flix_core::traits::Persistence;

use crate::events::FileEvents;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A write made through this handle (`value` is `None` for a removal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OwnWrite {
    pub(crate) generation: u64,
    pub(crate) value: Option<String>,
}

/// The latest write this handle made under each key.
///
/// Generations increase with every write so an event stream can tell a
/// write it has already accounted for from a newer one.
#[derive(Debug, Default)]
pub(crate) struct WriteLog {
    next_generation: u64,
    entries: HashMap<String, OwnWrite>,
}

impl WriteLog {
    fn record(&mut self, key: &str, value: Option<&str>) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.entries.insert(
            key.to_string(),
            OwnWrite {
                generation,
                value: value.map(str::to_string),
            },
        );
        generation
    }

    /// Drop the entry for `key` if it is still the given write.
    fn retract(&mut self, key: &str, generation: u64) {
        if self
            .entries
            .get(key)
            .is_some_and(|own| own.generation == generation)
        {
            self.entries.remove(key);
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&OwnWrite> {
        self.entries.get(key)
    }

    pub(crate) fn generations(&self) -> HashMap<String, u64> {
        self.entries
            .iter()
            .map(|(key, own)| (key.clone(), own.generation))
            .collect()
    }
}

pub(crate) type Written = Arc<Mutex<WriteLog>>;

/// Filesystem-backed persistence rooted at a directory.
///
/// Clones share the record of their own writes, so a clone's events do not
/// report writes made through the original.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
    poll_interval: Duration,
    written: Written,
}

impl FileStorage {
    /// Create a storage handle at the given root directory.
    ///
    /// Nothing is created on disk until the first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            written: Arc::default(),
        }
    }

    /// How often the event stream rescans in case a watcher event was missed.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the directory holding the value files.
    pub fn storage_dir(&self) -> PathBuf {
        self.root.join("storage")
    }

    fn lock_path(&self) -> PathBuf {
        self.storage_dir().join(".lock")
    }

    pub(crate) fn value_path(&self, key: &str) -> PathBuf {
        self.storage_dir().join(format!("{}.json", key))
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub(crate) fn written(&self) -> &Written {
        &self.written
    }

    /// Keys are used as file names.
    fn validate_key(key: &str) -> Result<()> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');

        if !valid {
            return Err(InvalidInputError::Other {
                message: format!("invalid storage key '{}'", key),
            }
            .into());
        }
        Ok(())
    }

    /// Read a value file directly, bypassing key validation.
    pub(crate) fn read_path(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn lock(&self) -> Result<File> {
        let dir = self.storage_dir();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable {
            message: format!("cannot create {}: {}", dir.display(), e),
        })?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        lock_file.lock_exclusive()?;
        Ok(lock_file)
    }

    fn remember(&self, key: &str, value: Option<&str>) -> u64 {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(key, value)
    }

    fn forget(&self, key: &str, generation: u64) {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retract(key, generation);
    }
}

impl Persistence for FileStorage {
    type Events = FileEvents;

    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::validate_key(key)?;
        Self::read_path(&self.value_path(key))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::validate_key(key)?;
        let lock_file = self.lock()?;

        let path = self.value_path(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)?;
        // Recorded before the rename so a concurrent rescan never mistakes
        // this write for another process's.
        let generation = self.remember(key, Some(value));
        if let Err(e) = fs::rename(&temp_path, &path) {
            self.forget(key, generation);
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        lock_file.unlock()?;

        debug!(path = %path.display(), "Stored value");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<()> {
        Self::validate_key(key)?;
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(());
        }

        let lock_file = self.lock()?;
        let generation = self.remember(key, None);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                self.forget(key, generation);
                return Err(e.into());
            }
        }
        lock_file.unlock()?;

        debug!(path = %path.display(), "Removed value");
        Ok(())
    }

    fn events(&self) -> Result<Self::Events> {
        FileEvents::from_storage(self.clone())
    }
}
