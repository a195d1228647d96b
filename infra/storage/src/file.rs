//! Durable file-backed store implementation providing sandboxed, atomic
//! key-value I/O.
//!
//! This module contains the primary [`FileStore`] handle. It manages the
//! physical filesystem root, maps validated keys to physical paths, and
//! performs every write as an atomic swap so a crash can never leave a torn
//! value behind.

use crate::builder::FileStoreBuilder;
use crate::contract::KeyValueStore;
use crate::error::{StorageError, StorageErrorExt};
use crate::key::StoreKey;
use std::fs;
use std::io::{ErrorKind, Write};
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// The internal shared state of a [`FileStore`] instance.
#[derive(Debug)]
pub struct FileStoreInner {
    /// The canonicalized physical path on the disk where all entries live.
    pub(crate) root: PathBuf,
    /// A unique counter used to generate temporary file names.
    pub(crate) tmp_counter: AtomicU64,
}

/// A thread-safe handle to the durable file-backed store.
///
/// `FileStore` keeps one file per key directly under its root directory.
/// Key validation guarantees a file name can never contain a path separator
/// or start with `.`, so entries cannot escape the root and cannot collide
/// with the store's own temporary files.
///
/// - **Atomic Writes**: Prevents value corruption using temporary files and
///   renames.
/// - **Self-Healing**: Automatic cleanup of stale temporary files on open.
///
/// This handle is internally reference-counted (`Arc`) and can be cheaply
/// cloned across components.
///
/// # Example
///
/// ```rust
/// use siteline_storage::{FileStore, KeyValueStore, StorageError};
///
/// fn main() -> Result<(), StorageError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     # let root = tmp.path().join("data");
///     let store = FileStore::builder().root(&root).create(true).open()?;
///
///     store.set("session.user", "u_42")?;
///     assert_eq!(store.get("session.user")?.as_deref(), Some("u_42"));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    pub(crate) inner: Arc<FileStoreInner>,
}

impl Deref for FileStore {
    type Target = FileStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FileStore {
    #[must_use = "The store is not opened until you call .open()"]
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::new()
    }

    /// The canonicalized root directory of this store.
    #[must_use]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Resolves a validated key to its physical path inside the root.
    #[must_use]
    pub fn resolve(&self, key: &StoreKey) -> PathBuf {
        self.root.join(key.as_ref())
    }

    /// Generates a unique temporary path for an in-flight write of `key`.
    ///
    /// Temp names start with `.` and end with `.tmp`; valid keys can do
    /// neither, so temp files never shadow real entries.
    fn tmp_path(&self, key: &StoreKey) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.root.join(format!(".{key}.{n}.tmp"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = StoreKey::try_from(key)?;
        match fs::read_to_string(self.resolve(&key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).context(format!("Failed to read storage entry: {key}"))
            },
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key = StoreKey::try_from(key)?;
        let target = self.resolve(&key);
        let tmp = self.tmp_path(&key);

        // Atomic swap: write + flush the sibling temp file, then rename it
        // over the final path. Readers observe either the old value or the
        // new one, never a partial write.
        let result = (|| -> Result<(), std::io::Error> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &target)
        })();

        if result.is_err() {
            // The orphaned temp file is reclaimed on the next open.
            let _ = fs::remove_file(&tmp);
        }
        result.context(format!("Failed to persist storage entry: {key}"))?;

        trace!(%key, bytes = value.len(), "Storage entry persisted");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let key = StoreKey::try_from(key)?;
        match fs::remove_file(self.resolve(&key)) {
            Ok(()) => {
                debug!(%key, "Storage entry removed");
                Ok(())
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).context(format!("Failed to remove storage entry: {key}"))
            },
        }
    }
}
