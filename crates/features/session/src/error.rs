use siteline_storage::StorageError;
use std::borrow::Cow;

/// A specialized [`SessionError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Durable-storage failures propagate unmodified; the session layer adds
    /// context but defines no retry policy.
    #[error("Session storage error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },
}

/// Attaches human-readable context to a `Result` carrying a [`SessionError`]
/// (or one of its source error types).
pub trait SessionErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SessionError>;
}

impl<T> SessionErrorExt<T> for Result<T, SessionError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                SessionError::Storage { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl From<StorageError> for SessionError {
    #[inline]
    fn from(source: StorageError) -> Self {
        Self::Storage { source, context: None }
    }
}

impl<T> SessionErrorExt<T> for Result<T, StorageError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SessionError> {
        self.map_err(|source| SessionError::Storage { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
