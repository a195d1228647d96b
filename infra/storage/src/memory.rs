use crate::contract::KeyValueStore;
use crate::error::StorageError;
use crate::key::StoreKey;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::trace;

/// A volatile, in-memory implementation of [`KeyValueStore`].
///
/// Backs tests and host environments without a usable filesystem. Values do
/// not survive the process; everything else (key validation, absence
/// semantics) matches [`FileStore`] exactly.
///
/// The handle is internally reference-counted and can be cheaply cloned.
///
/// [`FileStore`]: crate::FileStore
///
/// # Example
///
/// ```rust
/// use siteline_storage::{KeyValueStore, MemoryStore, StorageError};
///
/// # fn main() -> Result<(), StorageError> {
/// let store = MemoryStore::new();
/// store.set("auth.token", "tok_1")?;
/// assert_eq!(store.get("auth.token")?.as_deref(), Some("tok_1"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<FxHashMap<StoreKey, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = StoreKey::try_from(key)?;
        Ok(self.entries.read().get(&key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key = StoreKey::try_from(key)?;
        trace!(%key, "Memory store write");
        self.entries.write().insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let key = StoreKey::try_from(key)?;
        trace!(%key, "Memory store remove");
        self.entries.write().remove(&key);
        Ok(())
    }
}
