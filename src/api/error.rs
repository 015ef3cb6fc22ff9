//! Boundary errors and their rejection kinds.

use crate::board::{domain::UserId, services::BoardServiceError};
use crate::identity::{ports::UserRepositoryError, services::IdentityError};
use std::fmt;
use thiserror::Error;

/// Coarse failure kind reported to callers outside the crate.
///
/// Internal distinctions such as "not a member" versus "role too low" are
/// deliberately collapsed here; the full error stays available for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// No valid credential was presented.
    Forbidden,
    /// The credential names no registered user.
    Unauthorized,
    /// The user may not perform the operation in this group.
    AccessDenied,
    /// The target resource does not exist.
    NotFound,
    /// The request conflicts with existing data or fails validation.
    BadRequest,
    /// Storage failed; nothing was changed.
    Internal,
}

impl Rejection {
    /// Returns a stable name for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::Unauthorized => "unauthorized",
            Self::AccessDenied => "access_denied",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`super::BoardApi`].
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Caller identity could not be established.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The board operation failed.
    #[error(transparent)]
    Board(#[from] BoardServiceError),

    /// A referenced user does not exist.
    #[error("user {0} not found")]
    UnknownUser(UserId),
}

impl ApiError {
    /// Maps the error to its boundary kind.
    #[must_use]
    pub const fn rejection(&self) -> Rejection {
        match self {
            Self::Identity(err) => identity_rejection(err),
            Self::Board(err) => board_rejection(err),
            Self::UnknownUser(_) => Rejection::NotFound,
        }
    }
}

const fn identity_rejection(err: &IdentityError) -> Rejection {
    match err {
        IdentityError::Unauthenticated => Rejection::Forbidden,
        IdentityError::NoSuchUser(_) => Rejection::Unauthorized,
        IdentityError::Domain(_)
        | IdentityError::Repository(UserRepositoryError::DuplicateUsername(_)) => {
            Rejection::BadRequest
        }
        IdentityError::Repository(UserRepositoryError::Persistence(_)) => Rejection::Internal,
    }
}

const fn board_rejection(err: &BoardServiceError) -> Rejection {
    match err {
        BoardServiceError::AccessDenied(_) => Rejection::AccessDenied,
        BoardServiceError::GroupNotFound(_) | BoardServiceError::TaskNotFound { .. } => {
            Rejection::NotFound
        }
        BoardServiceError::DuplicatePosition { .. }
        | BoardServiceError::DuplicateMembership { .. }
        | BoardServiceError::InvalidInput(_) => Rejection::BadRequest,
        BoardServiceError::CreationFailed(_)
        | BoardServiceError::TransactionAborted(_)
        | BoardServiceError::Store(_) => Rejection::Internal,
    }
}

/// Result type for boundary operations.
pub type ApiResult<T> = Result<T, ApiError>;
