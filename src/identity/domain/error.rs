//! Error types for identity value validation.

use thiserror::Error;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username contains whitespace.
    #[error("username '{0}' must not contain whitespace")]
    InvalidUsername(String),

    /// The username is longer than the stored column allows.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum number of characters.
        max: usize,
    },

    /// The nickname is empty after trimming.
    #[error("nickname must not be empty")]
    EmptyNickname,

    /// The trimmed nickname is longer than the stored column allows.
    #[error("nickname must be at most {max} characters")]
    NicknameTooLong {
        /// Maximum number of characters.
        max: usize,
    },
}
