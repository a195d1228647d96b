use crate::error::{SessionError, SessionErrorExt};
use parking_lot::RwLock;
use siteline_storage::KeyValueStore;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// The fixed durable-storage key holding the bearer credential.
pub const AUTH_TOKEN_KEY: &str = "auth.token";

type Listener = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// Opaque registration token returned by [`SessionStore::subscribe`].
///
/// Removal is by token rather than by callback reference identity; every
/// `subscribe` call registers independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
}

/// The two logical session states, derived from token presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Anonymous,
}

struct SessionInner {
    storage: Arc<dyn KeyValueStore>,
    token: RwLock<Option<String>>,
    listeners: RwLock<Vec<(u64, Listener)>>,
    next_subscription: AtomicU64,
}

impl fmt::Debug for SessionInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionInner")
            .field("storage", &self.storage)
            .field("authenticated", &self.token.read().is_some())
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}

/// A thread-safe handle to the session token store.
///
/// Invariant: the in-memory token and the durable-storage value under
/// [`AUTH_TOKEN_KEY`] are equal whenever a mutating operation returns,
/// on both the success and the error path.
///
/// The handle is internally reference-counted (`Arc`) and can be cheaply
/// cloned into every consumer at the composition root.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Constructs the store, reading any persisted token from `storage`.
    ///
    /// Absence of a stored value yields the [`SessionState::Anonymous`]
    /// state. No notification is emitted: nothing changed, and nothing can
    /// have subscribed yet.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the persisted value cannot be read.
    pub fn init(storage: Arc<dyn KeyValueStore>) -> Result<Self, SessionError> {
        let token =
            storage.get(AUTH_TOKEN_KEY).context("Failed to read persisted auth token")?;

        debug!(authenticated = token.is_some(), "Session store initialized");

        Ok(Self {
            inner: Arc::new(SessionInner {
                storage,
                token: RwLock::new(token),
                listeners: RwLock::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
            }),
        })
    }

    /// The current in-memory token. No side effects.
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.inner.token.read().clone()
    }

    /// The current logical state, derived from token presence.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.inner.token.read().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Sets the token, persists it, then notifies listeners with the new
    /// value in subscription order.
    ///
    /// The durable write happens before any listener runs, so listeners
    /// always observe a consistent store. If persistence fails the in-memory
    /// value is rolled back and no listener is invoked.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the token cannot be persisted.
    pub fn update_auth_token(&self, token: &str) -> Result<(), SessionError> {
        let previous = {
            let mut guard = self.inner.token.write();
            std::mem::replace(&mut *guard, Some(token.to_owned()))
        };

        if let Err(err) = self.inner.storage.set(AUTH_TOKEN_KEY, token) {
            *self.inner.token.write() = previous;
            return Err(err).context("Failed to persist auth token");
        }

        debug!("Auth token updated");
        self.notify(Some(token));
        Ok(())
    }

    /// Clears the token, removes the durable entry, then notifies listeners
    /// with `None`.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the durable entry cannot be
    /// removed; the in-memory value is rolled back and no listener runs.
    pub fn revoke_auth_token(&self) -> Result<(), SessionError> {
        let previous = self.inner.token.write().take();

        if let Err(err) = self.inner.storage.remove(AUTH_TOKEN_KEY) {
            *self.inner.token.write() = previous;
            return Err(err).context("Failed to remove persisted auth token");
        }

        debug!("Auth token revoked");
        self.notify(None);
        Ok(())
    }

    /// Registers a listener invoked with the new token value on every change.
    ///
    /// Listeners are invoked synchronously, in subscription order. Every call
    /// registers independently and returns its own [`Subscription`] token.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        let id = self.inner.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.write().push((id, Arc::new(listener)));
        trace!(subscription = id, "Session listener registered");
        Subscription { id }
    }

    /// Removes the listener registered under `subscription`.
    ///
    /// Returns `true` if a listener was removed; unsubscribing an unknown or
    /// already-removed token is a no-op returning `false`.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut listeners = self.inner.listeners.write();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription.id);
        let removed = listeners.len() != before;
        if removed {
            trace!(subscription = subscription.id, "Session listener removed");
        }
        removed
    }

    /// Dispatches `token` to every listener, FIFO by subscription order.
    ///
    /// The registry is snapshotted before dispatch and no lock is held while
    /// listeners run, so re-entrant subscribe/unsubscribe cannot deadlock.
    /// A panicking listener aborts the remaining notifications (fail-fast).
    fn notify(&self, token: Option<&str>) {
        let snapshot: Vec<Listener> =
            self.inner.listeners.read().iter().map(|(_, listener)| listener.clone()).collect();

        trace!(
            listeners = snapshot.len(),
            authenticated = token.is_some(),
            "Dispatching session change"
        );

        for listener in snapshot {
            listener(token);
        }
    }
}
