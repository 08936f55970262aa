//! Credential hashing port.

use crate::account::domain::{Password, PasswordHash};
use thiserror::Error;

/// Password hashing contract.
///
/// Implementations turn a non-empty plaintext into an opaque hash and verify
/// plaintexts against hashes they produced earlier.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hashes a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Hashing`] when the hashing backend fails.
    fn hash(&self, password: &Password) -> Result<PasswordHash, CredentialError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` when the password does not match.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MalformedHash`] when the stored hash cannot
    /// be parsed, or [`CredentialError::Hashing`] when verification fails for
    /// any reason other than a mismatch.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, CredentialError>;
}

/// Errors returned by credential hashers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The hashing backend failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The stored hash is not in a recognised format.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}
