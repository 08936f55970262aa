//! Directional follow relationship.

use super::{AccountDomainError, AccountId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge meaning "`follower` follows `followed`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FollowEdge {
    follower: AccountId,
    followed: AccountId,
}

impl FollowEdge {
    /// Creates a follow edge between two distinct accounts.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::SelfFollow`] when both ends are the same
    /// account.
    pub fn new(follower: AccountId, followed: AccountId) -> Result<Self, AccountDomainError> {
        if follower == followed {
            return Err(AccountDomainError::SelfFollow(follower));
        }
        Ok(Self { follower, followed })
    }

    /// Returns the following account.
    #[must_use]
    pub const fn follower(self) -> AccountId {
        self.follower
    }

    /// Returns the followed account.
    #[must_use]
    pub const fn followed(self) -> AccountId {
        self.followed
    }
}

impl fmt::Display for FollowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.follower, self.followed)
    }
}
