//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The group name is empty after trimming.
    #[error("group name must not be empty")]
    EmptyGroupName,

    /// The trimmed group name is longer than the stored column allows.
    #[error("group name must be at most {max} characters")]
    GroupNameTooLong {
        /// Maximum number of characters.
        max: usize,
    },

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The trimmed task title is longer than the stored column allows.
    #[error("task title must be at most {max} characters")]
    TaskTitleTooLong {
        /// Maximum number of characters.
        max: usize,
    },

    /// The position key is empty.
    #[error("position key must not be empty")]
    EmptyPositionKey,

    /// The position key contains a NUL character.
    #[error("position key must not contain NUL characters")]
    PositionKeyContainsNul,

    /// Ownership is only granted by creating a group.
    #[error("the owner role cannot be granted to an additional member")]
    OwnerRoleNotAssignable,
}

/// Error returned while parsing roles from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
