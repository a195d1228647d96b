//! Facade crate for Siteline client-core features and shared modules.
//! Re-exports the navigation/session/storage primitives and owns the
//! composition root. Keep this crate thin: it should compose other crates,
//! not implement business logic.
//!
//! ## Usage
//! - Load a [`config::ClientConfig`] (file + `SITELINE__` env overrides).
//! - Call [`init`] once at application start and pass the returned
//!   [`SessionStore`] handle to every consumer (explicit dependency
//!   injection; there is no module-level singleton).

pub mod config;
mod error;

pub use error::{InitError, InitErrorExt};
pub use siteline_navigation as navigation;
pub use siteline_session as session;
pub use siteline_storage as storage;

use crate::config::ClientConfig;
use siteline_session::SessionStore;
use siteline_storage::FileStore;
use std::sync::Arc;
use tracing::info;

/// Initializes the client core: opens durable storage at the configured root
/// and constructs the session store from it.
///
/// # Errors
/// Returns an error if the storage root cannot be opened or the persisted
/// session state cannot be read.
pub fn init(config: &ClientConfig) -> Result<SessionStore, InitError> {
    let store = FileStore::builder()
        .root(&config.storage.data_dir)
        .create(config.storage.create)
        .open()?;

    let session = SessionStore::init(Arc::new(store))?;

    info!("Siteline client core initialized");
    Ok(session)
}
