//! Persisted key/value stores.
//!
//! A store is one JSON object on disk (`{ "<key>": <record>, ... }`) bound to a
//! single path. Loading a missing file yields an empty store. Mutations stay in
//! memory until [`ConfigStore::write`], which replaces the whole file
//! (temp file + rename) with restricted permissions (0600).

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or flushing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but could not be read.
    #[error("Failed to read store {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The backing file exists but does not hold a valid snapshot.
    #[error("Store {} is corrupt", .path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The snapshot could not be written.
    #[error("Failed to write store {}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A string-keyed map of records persisted as a single JSON file.
#[derive(Debug)]
pub struct ConfigStore<V> {
    path: PathBuf,
    entries: BTreeMap<String, V>,
    dirty: bool,
}

impl<V> ConfigStore<V>
where
    V: Serialize + DeserializeOwned,
{
    /// Loads the store backed by `path`.
    /// Returns an empty store if the file doesn't exist (or is blank).
    ///
    /// # Errors
    /// Returns [`StoreError::Unreadable`] if the file can't be read and
    /// [`StoreError::CorruptState`] if it can't be parsed.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(source) => return Err(StoreError::CorruptState { path, source }),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Unreadable { path, source }),
        };

        debug!(path = %path.display(), entries = entries.len(), "store loaded");

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Persists the full in-memory snapshot, replacing the file's contents.
    ///
    /// # Errors
    /// Returns [`StoreError::PersistenceFailure`] if the snapshot can't be
    /// serialized or the file can't be written.
    pub fn write(&mut self) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&self.entries).map_err(|err| {
            StoreError::PersistenceFailure {
                path: self.path.clone(),
                source: io::Error::from(err),
            }
        })?;

        write_atomic(&self.path, contents.as_bytes()).map_err(|source| {
            StoreError::PersistenceFailure {
                path: self.path.clone(),
                source,
            }
        })?;

        self.dirty = false;
        debug!(path = %self.path.display(), entries = self.entries.len(), "store written");
        Ok(())
    }
}

impl<V> ConfigStore<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or replaces the record for `key`. Not persisted until `write`.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
        self.dirty = true;
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Iterates records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if there are in-memory changes not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Writes `contents` to `path` via a sibling temp file and a rename, so
/// readers never observe a partially written file. The file is created 0600.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    Ok(())
}
