//! In-memory identity adapters for testing.

mod user;
mod verifier;

pub use user::InMemoryUserRepository;
pub use verifier::StaticTokenVerifier;
