use crate::error::StorageError;
use std::fmt::Debug;

/// The durable key-value contract consumed by client-core features.
///
/// Implementations must accept any key that passes [`StoreKey`] validation and
/// reject everything else with [`StorageError::InvalidKey`]. Absence of a value
/// is not an error: `get` on a missing key yields `Ok(None)` and `remove` on a
/// missing key is an idempotent `Ok(())`.
///
/// Implementors are handles intended to be shared across components, so the
/// trait requires `Send + Sync` and is object-safe.
///
/// [`StoreKey`]: crate::StoreKey
/// [`StorageError::InvalidKey`]: crate::StorageError::InvalidKey
pub trait KeyValueStore: Debug + Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Durably stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the entry under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
