//! Repository port for account persistence and relationship queries.

use crate::account::domain::{
    Account, AccountId, ChangeSet, CommitReceipt, Email, FollowEdge, Username,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for account repository operations.
pub type AccountRepositoryResult<T> = Result<T, AccountRepositoryError>;

/// Account persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Applies a staged change set atomically.
    ///
    /// Either every write in `changes` becomes durable or none does.
    ///
    /// # Errors
    ///
    /// Returns [`AccountRepositoryError::Constraint`] when a uniqueness,
    /// presence, or reference rule is violated.
    async fn apply(&self, changes: &ChangeSet) -> AccountRepositoryResult<CommitReceipt>;

    /// Finds an account by identifier.
    ///
    /// Returns `None` when the account does not exist.
    async fn find_by_id(&self, id: AccountId) -> AccountRepositoryResult<Option<Account>>;

    /// Finds an account by username.
    ///
    /// Returns `None` when no account has the username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> AccountRepositoryResult<Option<Account>>;

    /// Returns `true` when a follow edge from `follower` to `followed` exists.
    async fn is_following(
        &self,
        follower: AccountId,
        followed: AccountId,
    ) -> AccountRepositoryResult<bool>;
}

/// Storage rule broken by a commit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// An account was staged without a username.
    #[error("username is required")]
    MissingUsername,

    /// An account was staged without an email.
    #[error("email is required")]
    MissingEmail,

    /// Another account already uses the username.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// Another account already uses the email.
    #[error("duplicate email: {0}")]
    DuplicateEmail(Email),

    /// Another account already has the requested identifier.
    #[error("duplicate account identifier: {0}")]
    DuplicateAccountId(AccountId),

    /// The follow edge already exists.
    #[error("duplicate follow edge: {0}")]
    DuplicateFollow(FollowEdge),

    /// A staged write references an account that does not exist.
    #[error("unknown account: {0}")]
    UnknownAccount(AccountId),
}

/// Errors returned by account repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AccountRepositoryError {
    /// A storage constraint rejected the change set.
    #[error("constraint violation: {0}")]
    Constraint(#[from] ConstraintViolation),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccountRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the violated constraint, if this is a constraint error.
    #[must_use]
    pub const fn constraint(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Constraint(violation) => Some(violation),
            _ => None,
        }
    }
}
