use crate::error::{StorageError, StorageErrorExt};
use crate::file::{FileStore, FileStoreInner};
use crate::maintenance;
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing::info;

#[derive(Debug, Clone)]
struct FileStoreConfig {
    create: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self { create: true }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

/// A type-safe fluent builder for [`FileStore`].
///
/// The root directory is required; `open()` only becomes available once it
/// has been provided.
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct FileStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    config: FileStoreConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> FileStoreBuilder<S> {
    #[must_use = "Sets whether the root directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> FileStoreBuilder<N> {
        FileStoreBuilder { state, config: self.config }
    }
}

impl FileStoreBuilder<NoRoot> {
    #[must_use = "Creates a new store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the root directory path for the store"]
    pub fn root(self, path: impl Into<PathBuf>) -> FileStoreBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl FileStoreBuilder<WithRoot> {
    /// Consumes the configuration and opens the store.
    ///
    /// The boot sequence:
    /// 1. **Bootstrapping**: Creates the root directory if `create(true)` was
    ///    set; otherwise requires it to exist.
    /// 2. **Canonicalization**: Resolves the root to an absolute physical path
    ///    so all entries live under one well-known directory.
    /// 3. **Self-Healing**: Removes orphaned `.tmp` files left behind by
    ///    previous crashes. Cleanup is non-critical; failures are logged and
    ///    the open proceeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DirectoryNotFound`] if the root does not exist
    /// and `create` is false, or [`StorageError::Io`] if the directory cannot
    /// be created or resolved.
    pub fn open(self) -> Result<FileStore, StorageError> {
        let root = &self.state.0;

        if self.config.create {
            fs::create_dir_all(root)
                .context(format!("Failed to bootstrap storage root: {}", root.display()))?;
        } else if !root.is_dir() {
            return Err(StorageError::DirectoryNotFound {
                message: root.display().to_string().into(),
                context: Some("Storage root does not exist and create(false) was set".into()),
            });
        }

        let root = root
            .canonicalize()
            .context(format!("Failed to resolve storage root: {}", root.display()))?;

        maintenance::sweep_orphaned_tmp(&root);

        info!(root = %root.display(), "Storage opened");

        Ok(FileStore {
            inner: Arc::new(FileStoreInner { root, tmp_counter: AtomicU64::new(0) }),
        })
    }
}
