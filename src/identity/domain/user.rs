//! User records and validated user names.

use super::{IdentityDomainError, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, immutable login name of a user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length in characters, matching `users.username`.
    pub const MAX_LEN: usize = 64;

    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyUsername`] for blank input,
    /// [`IdentityDomainError::InvalidUsername`] when the trimmed value still
    /// contains whitespace and [`IdentityDomainError::UsernameTooLong`] when
    /// it exceeds [`Self::MAX_LEN`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyUsername);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IdentityDomainError::InvalidUsername(raw));
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(IdentityDomainError::UsernameTooLong { max: Self::MAX_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Accepts a name only when it is already in canonical form.
    ///
    /// Verified subjects are matched exactly, so surrounding whitespace is
    /// rejected rather than trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidUsername`] when `value` has
    /// surrounding whitespace, plus every error [`Self::new`] returns.
    pub fn exact(value: &str) -> Result<Self, IdentityDomainError> {
        if value.trim() != value {
            return Err(IdentityDomainError::InvalidUsername(value.to_owned()));
        }
        Self::new(value)
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: Username,
    nickname: String,
    credential_hash: String,
    created_at: DateTime<Utc>,
}

impl NewUser {
    /// Maximum nickname length in characters, matching `users.nickname`.
    pub const NICKNAME_MAX_LEN: usize = 128;

    /// Creates a signup record.
    ///
    /// The credential hash is opaque to this crate; hashing happens upstream.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyNickname`] when the nickname is
    /// blank and [`IdentityDomainError::NicknameTooLong`] when the trimmed
    /// nickname exceeds [`Self::NICKNAME_MAX_LEN`] characters.
    pub fn new(
        username: Username,
        nickname: impl Into<String>,
        credential_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, IdentityDomainError> {
        let trimmed_nickname = nickname.into().trim().to_owned();
        if trimmed_nickname.is_empty() {
            return Err(IdentityDomainError::EmptyNickname);
        }
        if trimmed_nickname.chars().count() > Self::NICKNAME_MAX_LEN {
            return Err(IdentityDomainError::NicknameTooLong {
                max: Self::NICKNAME_MAX_LEN,
            });
        }
        Ok(Self {
            username,
            nickname: trimmed_nickname,
            credential_hash: credential_hash.into(),
            created_at,
        })
    }

    /// Returns the requested username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the display nickname.
    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Returns the opaque credential hash.
    #[must_use]
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    /// Returns the signup timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the storage-assigned identifier.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            nickname: self.nickname,
            credential_hash: self.credential_hash,
            created_at: self.created_at,
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    nickname: String,
    #[serde(skip)]
    credential_hash: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted login name.
    pub username: Username,
    /// Persisted nickname.
    pub nickname: String,
    /// Persisted credential hash.
    pub credential_hash: String,
    /// Persisted signup timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            nickname: data.nickname,
            credential_hash: data.credential_hash,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the display nickname.
    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Returns the opaque credential hash.
    #[must_use]
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    /// Returns the signup timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
