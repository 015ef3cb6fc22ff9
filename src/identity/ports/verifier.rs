//! Port for the external credential verifier.

use async_trait::async_trait;

/// Verifies a bearer credential and yields the subject name it was issued to.
///
/// Token issuance, signing and expiry live outside this crate; implementors
/// only answer whether a presented token is currently valid.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns the verified subject name, or `None` when the token is invalid.
    async fn verify(&self, token: &str) -> Option<String>;
}
