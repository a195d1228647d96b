use crate::error::StorageError;
use std::fmt;

/// A validated storage key.
///
/// Keys name durable entries and double as file names inside the [`FileStore`]
/// root, so the charset is deliberately strict:
///
/// - Must be non-empty.
/// - Must start with an ASCII alphanumeric character.
/// - Remaining characters must be ASCII alphanumeric, `_`, or `.`.
/// - Keys are converted to lowercase.
///
/// Because a key can never start with `.` or contain a path separator, a
/// validated key always resolves strictly inside the storage root.
///
/// [`FileStore`]: crate::FileStore
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey(pub(crate) String);

impl TryFrom<String> for StoreKey {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for StoreKey {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        let key = value.to_lowercase();

        let Some(first) = key.chars().next() else {
            return Err(StorageError::InvalidKey {
                message: "EMPTY".into(),
                context: Some("Key cannot be empty".into()),
            });
        };

        if !first.is_ascii_alphanumeric() {
            return Err(StorageError::InvalidKey {
                message: key.into(),
                context: Some("Key must start with an alphanumeric character".into()),
            });
        }

        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
            return Err(StorageError::InvalidKey {
                message: key.into(),
                context: Some("Key contains illegal characters".into()),
            });
        }

        Ok(Self(key))
    }
}

impl AsRef<str> for StoreKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
