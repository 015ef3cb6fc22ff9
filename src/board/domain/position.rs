//! Client-chosen position keys.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key placing a task within its `(group, status)` partition.
///
/// Keys are generated by clients (for example by picking a string that sorts
/// between two neighbours) and compared bytewise. The server never computes
/// or renumbers them; it only rejects collisions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey(String);

impl PositionKey {
    /// Creates a position key.
    ///
    /// The value is kept verbatim, including whitespace, because it is
    /// opaque.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyPositionKey`] for an empty string
    /// and [`BoardDomainError::PositionKeyContainsNul`] when the key holds a
    /// `'\0'`, which `PostgreSQL` text cannot store.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let key = value.into();
        if key.is_empty() {
            return Err(BoardDomainError::EmptyPositionKey);
        }
        if key.contains('\0') {
            return Err(BoardDomainError::PositionKeyContainsNul);
        }
        Ok(Self(key))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PositionKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
