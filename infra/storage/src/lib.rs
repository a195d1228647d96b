//! A sandboxed, durable key-value storage engine.
//! It provides the persistence contract consumed by the session feature and any
//! other client-core component that needs small, named, durable string values
//! (credentials, preferences, cached identifiers).
//!
//! # Core Features
//!
//! - **Validated Keys**: Every key is checked against a strict charset before it
//!   can touch the filesystem, so a key can never escape the storage root.
//! - **Atomic Writes**: Uses an "atomic swap" pattern (unique temp write + flush +
//!   `rename`) to prevent torn values during crashes.
//! - **Self-Healing**: Orphaned temporary files left by a previous crash are
//!   cleaned up when the store is opened.
//! - **Pluggable Contract**: Consumers depend on the [`KeyValueStore`] trait;
//!   [`FileStore`] is the durable implementation and [`MemoryStore`] backs tests
//!   and hosts without a filesystem.
//!
//! All I/O is synchronous: values are small and callers run on an event-driven
//! single-flow model where storage access completes inline.
//!
//! # Examples
//!
//! ```rust
//! use siteline_storage::{FileStore, KeyValueStore, StorageError};
//!
//! fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("data");
//!     let store = FileStore::builder()
//!         .root(&root)
//!         .create(true)
//!         .open()?;
//!
//!     store.set("auth.token", "tok_123")?;
//!     assert_eq!(store.get("auth.token")?.as_deref(), Some("tok_123"));
//!
//!     store.remove("auth.token")?;
//!     assert_eq!(store.get("auth.token")?, None);
//!     Ok(())
//! }
//! ```

mod builder;
mod contract;
mod error;
mod file;
mod key;
mod maintenance;
mod memory;

pub use builder::FileStoreBuilder;
pub use contract::KeyValueStore;
pub use error::{StorageError, StorageErrorExt};
pub use file::FileStore;
pub use key::StoreKey;
pub use memory::MemoryStore;
