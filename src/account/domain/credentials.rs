//! Plaintext password input and stored password hashes.

use super::AccountDomainError;
use std::fmt;

/// Validated plaintext password supplied at signup or login.
///
/// The value is never rendered by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a validated password from optional caller input.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyPassword`] when the value is absent
    /// or empty.
    pub fn new(value: Option<String>) -> Result<Self, AccountDomainError> {
        match value {
            Some(plaintext) if !plaintext.is_empty() => Ok(Self(plaintext)),
            _ => Err(AccountDomainError::EmptyPassword),
        }
    }

    /// Returns the plaintext bytes for hashing or verification.
    #[must_use]
    pub fn expose_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Opaque password hash as stored with an account.
///
/// Hashes produced by the credential hasher use the PHC string format; the
/// domain treats the value as an opaque string.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an already-computed hash string.
    #[must_use]
    pub fn from_phc(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
