//! Identity resolution: subject name to numeric user identifier.

use crate::identity::{
    domain::{IdentityDomainError, NewUser, User, UserId, Username},
    ports::{CredentialVerifier, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Caller identity as handed over by the request layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// No credential was presented, or it failed verification.
    Anonymous,
    /// A credential was verified and names this subject.
    Verified(String),
}

impl Subject {
    /// Creates a verified subject.
    #[must_use]
    pub fn verified(name: impl Into<String>) -> Self {
        Self::Verified(name.into())
    }
}

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    nickname: String,
    credential_hash: String,
}

impl RegisterUserRequest {
    /// Creates a signup request. The credential hash is produced upstream.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        nickname: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            nickname: nickname.into(),
            credential_hash: credential_hash.into(),
        }
    }
}

/// Errors raised while resolving or registering users.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// No valid credential was presented.
    #[error("authentication required")]
    Unauthenticated,

    /// The credential is valid but names a user that does not exist.
    #[error("no user registered as '{0}'")]
    NoSuchUser(String),

    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Maps verified subjects to user identifiers.
#[derive(Clone)]
pub struct IdentityResolver<R, V, C>
where
    R: UserRepository,
    V: CredentialVerifier,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    verifier: Arc<V>,
    clock: Arc<C>,
}

impl<R, V, C> IdentityResolver<R, V, C>
where
    R: UserRepository,
    V: CredentialVerifier,
    C: Clock + Send + Sync,
{
    /// Creates a new identity resolver.
    #[must_use]
    pub const fn new(users: Arc<R>, verifier: Arc<V>, clock: Arc<C>) -> Self {
        Self {
            users,
            verifier,
            clock,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Domain`] for invalid names and
    /// [`IdentityError::Repository`] when the username is taken or storage
    /// fails.
    pub async fn register(&self, request: RegisterUserRequest) -> IdentityResult<User> {
        let username = Username::new(request.username)?;
        let new_user = NewUser::new(
            username,
            request.nickname,
            request.credential_hash,
            self.clock.utc(),
        )?;
        Ok(self.users.store(&new_user).await?)
    }

    /// Verifies a bearer token and resolves the user it names.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] when the token is absent or
    /// rejected, and [`IdentityError::NoSuchUser`] when the verified subject
    /// has no user record.
    pub async fn resolve_token(&self, token: Option<&str>) -> IdentityResult<UserId> {
        let Some(token) = token else {
            return Err(IdentityError::Unauthenticated);
        };
        let Some(subject) = self.verifier.verify(token).await else {
            debug!("credential verifier rejected presented token");
            return Err(IdentityError::Unauthenticated);
        };
        self.lookup(subject).await
    }

    /// Resolves a subject already verified by the request layer.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] for
    /// [`Subject::Anonymous`] and [`IdentityError::NoSuchUser`] when the
    /// subject has no user record.
    pub async fn resolve_subject(&self, subject: &Subject) -> IdentityResult<UserId> {
        match subject {
            Subject::Anonymous => Err(IdentityError::Unauthenticated),
            Subject::Verified(name) => self.lookup(name.clone()).await,
        }
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] when persistence lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> IdentityResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    async fn lookup(&self, subject: String) -> IdentityResult<UserId> {
        // Subjects are matched exactly; a name that is not already a
        // canonical username cannot have a user row.
        let Ok(username) = Username::exact(subject.as_str()) else {
            return Err(IdentityError::NoSuchUser(subject));
        };
        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or(IdentityError::NoSuchUser(subject))?;
        Ok(user.id())
    }
}
