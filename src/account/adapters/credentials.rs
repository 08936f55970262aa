//! Argon2id credential hasher.

use crate::account::{
    domain::{Password, PasswordHash},
    ports::{CredentialError, CredentialHasher},
};
use argon2::{
    Argon2,
    password_hash::{
        Error as PhcError, PasswordHash as PhcString, PasswordHasher, PasswordVerifier,
        SaltString,
    },
};
use rand::rngs::OsRng;

/// [`CredentialHasher`] backed by Argon2id with default parameters.
///
/// Every hash uses a fresh random salt, so hashing the same password twice
/// yields different PHC strings that both verify.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    /// Creates a hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.expose_bytes(), &salt)
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;
        Ok(PasswordHash::from_phc(phc.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, CredentialError> {
        let parsed = PhcString::new(hash.as_str())
            .map_err(|err| CredentialError::MalformedHash(err.to_string()))?;

        match Argon2::default().verify_password(password.expose_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(err) => Err(CredentialError::Hashing(err.to_string())),
        }
    }
}
