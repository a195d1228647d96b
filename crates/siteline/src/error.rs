use siteline_session::SessionError;
use siteline_storage::StorageError;
use std::borrow::Cow;

/// A specialized [`InitError`] enum for composition-root failures.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Storage init error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Session init error{}: {source}", format_context(.context))]
    Session { source: SessionError, context: Option<Cow<'static, str>> },
}

/// Attaches human-readable context to a `Result` carrying an [`InitError`]
/// (or one of its source error types).
pub trait InitErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, InitError>;
}

impl<T> InitErrorExt<T> for Result<T, InitError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                InitError::Storage { context: c, .. } | InitError::Session { context: c, .. } => {
                    *c = Some(context.into());
                },
            }
            e
        })
    }
}

impl From<StorageError> for InitError {
    #[inline]
    fn from(source: StorageError) -> Self {
        Self::Storage { source, context: None }
    }
}

impl From<SessionError> for InitError {
    #[inline]
    fn from(source: SessionError) -> Self {
        Self::Session { source, context: None }
    }
}

impl<T> InitErrorExt<T> for Result<T, StorageError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, InitError> {
        self.map_err(|source| InitError::Storage { source, context: Some(context.into()) })
    }
}

impl<T> InitErrorExt<T> for Result<T, SessionError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, InitError> {
        self.map_err(|source| InitError::Session { source, context: Some(context.into()) })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
