//! # Session feature slice
//!
//! Single source of truth for the current bearer credential, with durable
//! persistence and ordered change notification.
//!
//! ## Overview
//!
//! [`SessionStore`] holds the in-memory token, mirrors it into an injected
//! [`KeyValueStore`] under a fixed key, and synchronously invokes subscribed
//! listeners on every change, in subscription order. The store is a cheap-clone
//! handle meant to be constructed once at the composition root and passed to
//! every consumer; there is no global singleton.
//!
//! The HTTP layer is the expected collaborator but stays outside this crate:
//! on an authentication-failure response it calls [`SessionStore::revoke_auth_token`],
//! and a subscribed listener updates the default `Authorization` header on
//! every change.
//!
//! ## Notification semantics
//!
//! Delivery is synchronous and FIFO by subscription order. A listener that
//! panics aborts the remaining notifications and the panic propagates to the
//! mutating caller (fail-fast; listeners are trusted internal plumbing). The
//! listener list is snapshotted before dispatch, so re-entrant `subscribe` /
//! `unsubscribe` calls from inside a listener affect only later notifications.
//!
//! [`KeyValueStore`]: siteline_storage::KeyValueStore
//!
//! # Example
//!
//! ```rust
//! use siteline_session::SessionStore;
//! use siteline_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), siteline_session::SessionError> {
//! let session = SessionStore::init(Arc::new(MemoryStore::new()))?;
//!
//! let sub = session.subscribe(|token| {
//!     // e.g. set or clear the Authorization header default
//!     let _ = token;
//! });
//!
//! session.update_auth_token("tok_123")?;
//! assert_eq!(session.auth_token().as_deref(), Some("tok_123"));
//!
//! session.revoke_auth_token()?;
//! assert_eq!(session.auth_token(), None);
//!
//! session.unsubscribe(&sub);
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub use error::{SessionError, SessionErrorExt};
pub use store::{AUTH_TOKEN_KEY, SessionState, SessionStore, Subscription};
