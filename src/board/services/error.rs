//! Service-level errors for board operations.

use crate::board::{
    domain::{BoardDomainError, Capability, GroupId, Role, TaskId, TaskStatus, UserId},
    ports::BoardStoreError,
};
use thiserror::Error;

/// Reasons an authorization check fails.
///
/// The variants stay distinct for logging; callers outside the board
/// context see both as [`BoardServiceError::AccessDenied`].
#[derive(Debug, Clone, Error)]
pub enum AuthorizationError {
    /// The user holds no role in the group.
    #[error("user {user_id} is not a member of group {group_id}")]
    NotAMember {
        /// Requesting user.
        user_id: UserId,
        /// Target group.
        group_id: GroupId,
    },

    /// The user's role is below the capability threshold.
    #[error("{capability} requires {required}, user holds {actual}")]
    InsufficientRole {
        /// Requested capability.
        capability: Capability,
        /// Minimum role for the capability.
        required: Role,
        /// Role actually held.
        actual: Role,
    },

    /// The membership lookup failed.
    #[error(transparent)]
    Store(#[from] BoardStoreError),
}

/// Errors returned by group and task services.
#[derive(Debug, Clone, Error)]
pub enum BoardServiceError {
    /// The caller may not perform the operation.
    #[error("access denied: {0}")]
    AccessDenied(AuthorizationError),

    /// The group does not exist.
    #[error("group {0} not found")]
    GroupNotFound(GroupId),

    /// The task does not exist in the group.
    #[error("task {task_id} not found in group {group_id}")]
    TaskNotFound {
        /// Group searched.
        group_id: GroupId,
        /// Task requested.
        task_id: TaskId,
    },

    /// Another task already holds the position.
    #[error("position already taken in group {group_id}, status {status}")]
    DuplicatePosition {
        /// Group of the partition.
        group_id: GroupId,
        /// Status of the partition.
        status: TaskStatus,
    },

    /// The user already holds a role in the group.
    #[error("user {user_id} is already a member of group {group_id}")]
    DuplicateMembership {
        /// Member.
        user_id: UserId,
        /// Group.
        group_id: GroupId,
    },

    /// Group creation was rolled back.
    #[error("group creation failed: {0}")]
    CreationFailed(BoardStoreError),

    /// A multi-statement operation was rolled back.
    #[error("transaction aborted: {0}")]
    TransactionAborted(BoardStoreError),

    /// Input validation failed.
    #[error(transparent)]
    InvalidInput(#[from] BoardDomainError),

    /// Storage failed.
    #[error(transparent)]
    Store(BoardStoreError),
}

impl BoardServiceError {
    /// Returns `true` when the error is a not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::GroupNotFound(_) | Self::TaskNotFound { .. })
    }
}

impl From<BoardStoreError> for BoardServiceError {
    fn from(err: BoardStoreError) -> Self {
        match err {
            BoardStoreError::DuplicatePosition { group_id, status } => {
                Self::DuplicatePosition { group_id, status }
            }
            BoardStoreError::DuplicateMembership { user_id, group_id } => {
                Self::DuplicateMembership { user_id, group_id }
            }
            BoardStoreError::Persistence(_) => Self::Store(err),
        }
    }
}

impl From<AuthorizationError> for BoardServiceError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::Store(store) => Self::from(store),
            AuthorizationError::NotAMember { .. } | AuthorizationError::InsufficientRole { .. } => {
                Self::AccessDenied(err)
            }
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
