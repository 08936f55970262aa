//! Numeric identifiers for accounts and messages.

use super::AccountDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an account record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Creates a validated account identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InvalidAccountId`] when the value is zero
    /// or negative.
    pub const fn new(value: i64) -> Result<Self, AccountDomainError> {
        if value <= 0 {
            return Err(AccountDomainError::InvalidAccountId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a message record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Creates a validated message identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::InvalidMessageId`] when the value is zero
    /// or negative.
    pub const fn new(value: i64) -> Result<Self, AccountDomainError> {
        if value <= 0 {
            return Err(AccountDomainError::InvalidMessageId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
