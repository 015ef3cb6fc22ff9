//! Port contracts for user identity.

pub mod repository;
pub mod verifier;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use verifier::CredentialVerifier;
