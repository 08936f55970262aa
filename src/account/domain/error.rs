//! Error types for account domain validation.

use super::AccountId;
use thiserror::Error;

/// Errors returned while constructing account domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The plaintext password is absent or empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The account identifier is not a positive integer.
    #[error("invalid account id {0}, expected a positive integer")]
    InvalidAccountId(i64),

    /// The message identifier is not a positive integer.
    #[error("invalid message id {0}, expected a positive integer")]
    InvalidMessageId(i64),

    /// The message text is empty after trimming.
    #[error("message text must not be empty")]
    EmptyMessageText,

    /// The message text exceeds the storage limit.
    #[error("message text has {length} characters, exceeds limit of {max}")]
    MessageTextTooLong {
        /// Number of characters in the rejected text.
        length: usize,
        /// Maximum number of characters accepted.
        max: usize,
    },

    /// An account attempted to follow itself.
    #[error("account {0} cannot follow itself")]
    SelfFollow(AccountId),
}
