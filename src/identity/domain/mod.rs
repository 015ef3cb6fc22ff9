//! Domain model for user identity.

mod error;
mod ids;
mod user;

pub use error::IdentityDomainError;
pub use ids::UserId;
pub use user::{NewUser, PersistedUserData, User, Username};
