//! Unit of work for account signup, relationships, and authentication.
//!
//! Provides [`AccountSession`], which stages writes in a pending set and
//! hands them to the repository as one change set on commit. Validation
//! errors surface when a write is staged; storage constraints surface only
//! when the session commits.

use crate::account::{
    domain::{
        Account, AccountDomainError, AccountId, ChangeSet, CommitReceipt, Email, FollowEdge,
        MessageText, NewAccount, NewMessage, Password, StagedAccount, Username,
    },
    ports::{
        AccountRepository, AccountRepositoryError, ConstraintViolation, CredentialError,
        CredentialHasher,
    },
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for signing up a new account.
///
/// Username and email are optional so that missing values reach the store,
/// which rejects them at commit. The password is checked immediately.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    profile_image_url: Option<String>,
    id: Option<AccountId>,
}

impl SignupRequest {
    /// Creates a request with every required field present.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::from_parts(
            Some(username.into()),
            Some(email.into()),
            Some(password.into()),
        )
    }

    /// Creates a request from optional caller input.
    #[must_use]
    pub const fn from_parts(
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            username,
            email,
            password,
            profile_image_url: None,
            id: None,
        }
    }

    /// Sets the profile image URL.
    #[must_use]
    pub fn with_profile_image_url(mut self, url: impl Into<String>) -> Self {
        self.profile_image_url = Some(url.into());
        self
    }

    /// Requests an explicit account identifier.
    #[must_use]
    pub const fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("profile_image_url", &self.profile_image_url)
            .field("id", &self.id)
            .finish()
    }
}

/// Service-level errors for account session operations.
#[derive(Debug, Error)]
pub enum AccountSessionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),
    /// Password hashing or verification failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AccountRepositoryError),
}

impl AccountSessionError {
    /// Returns `true` when the error is a synchronous validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns the violated storage constraint, if any.
    #[must_use]
    pub const fn constraint_violation(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Repository(err) => err.constraint(),
            _ => None,
        }
    }
}

/// Result type for account session operations.
pub type AccountSessionResult<T> = Result<T, AccountSessionError>;

/// Account store unit of work.
///
/// Staging methods take `&mut self` and never touch the repository. A failed
/// [`commit`](Self::commit) leaves the pending set intact; call
/// [`rollback`](Self::rollback) to discard it.
pub struct AccountSession<R, H, C>
where
    R: AccountRepository,
    H: CredentialHasher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
    pending: ChangeSet,
}

impl<R, H, C> AccountSession<R, H, C>
where
    R: AccountRepository,
    H: CredentialHasher,
    C: Clock + Send + Sync,
{
    /// Creates a session with an empty pending set.
    #[must_use]
    pub fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            clock,
            pending: ChangeSet::new(),
        }
    }

    /// Validates signup input, hashes the password, and stages the account.
    ///
    /// Duplicate or missing usernames and emails are not detected here; they
    /// are reported by [`commit`](Self::commit).
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Domain`] when the password is absent or
    /// empty, or [`AccountSessionError::Credential`] when hashing fails.
    /// Nothing is staged on error.
    pub fn signup(&mut self, request: SignupRequest) -> AccountSessionResult<StagedAccount> {
        let SignupRequest {
            username,
            email,
            password: plaintext,
            profile_image_url,
            id,
        } = request;

        let password = Password::new(plaintext)?;
        let password_hash = self.hasher.hash(&password)?;

        let mut account = NewAccount::new(
            username.map(Username::new),
            email.map(Email::new),
            password_hash,
        );
        if let Some(url) = profile_image_url {
            account = account.with_profile_image_url(url);
        }
        if let Some(requested) = id {
            account = account.with_id(requested);
        }
        Ok(self.add(account))
    }

    /// Stages an account whose password hash was computed elsewhere.
    pub fn add(&mut self, account: NewAccount) -> StagedAccount {
        debug!(
            username = account.username().map(Username::as_str),
            requested_id = account.id().map(AccountId::value),
            "staging account"
        );
        self.pending.stage_account(account)
    }

    /// Stages a follow edge from `follower` to `followed`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Domain`] when both identifiers name the
    /// same account.
    pub fn follow(&mut self, follower: AccountId, followed: AccountId) -> AccountSessionResult<()> {
        let edge = FollowEdge::new(follower, followed)?;
        debug!(%edge, "staging follow");
        self.pending.stage_follow(edge);
        Ok(())
    }

    /// Stages removal of the follow edge from `follower` to `followed`.
    ///
    /// Removing an edge that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Domain`] when both identifiers name the
    /// same account.
    pub fn unfollow(
        &mut self,
        follower: AccountId,
        followed: AccountId,
    ) -> AccountSessionResult<()> {
        let edge = FollowEdge::new(follower, followed)?;
        debug!(%edge, "staging unfollow");
        self.pending.stage_unfollow(edge);
        Ok(())
    }

    /// Stages a message authored by `author`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Domain`] when the text is empty or too
    /// long.
    pub fn post_message(
        &mut self,
        author: AccountId,
        text: impl Into<String>,
    ) -> AccountSessionResult<()> {
        let body = MessageText::new(text)?;
        debug!(%author, "staging message");
        self.pending
            .stage_message(NewMessage::new(author, body, &*self.clock));
        Ok(())
    }

    /// Returns the pending-write set.
    #[must_use]
    pub const fn pending(&self) -> &ChangeSet {
        &self.pending
    }

    /// Flushes every pending write to the repository.
    ///
    /// On success the pending set is cleared and the receipt maps staged
    /// accounts to their stored identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Repository`] when the repository rejects
    /// the change set. No write from the change set is persisted and the
    /// pending set is kept.
    pub async fn commit(&mut self) -> AccountSessionResult<CommitReceipt> {
        if self.pending.is_empty() {
            return Ok(CommitReceipt::default());
        }

        match self.repository.apply(&self.pending).await {
            Ok(receipt) => {
                info!(
                    accounts = receipt.account_ids().len(),
                    messages = receipt.message_ids().len(),
                    follows = self.pending.follows().len(),
                    unfollows = self.pending.unfollows().len(),
                    "committed pending writes"
                );
                self.pending.clear();
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, pending = self.pending.len(), "commit rejected");
                Err(err.into())
            }
        }
    }

    /// Discards every pending write and returns how many were dropped.
    pub fn rollback(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        if discarded > 0 {
            debug!(discarded, "rolled back pending writes");
        }
        discarded
    }

    /// Finds a persisted account by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: AccountId) -> AccountSessionResult<Option<Account>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a persisted account by username.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Repository`] when lookup fails.
    pub async fn find_by_username(&self, username: &str) -> AccountSessionResult<Option<Account>> {
        Ok(self
            .repository
            .find_by_username(&Username::new(username))
            .await?)
    }

    /// Returns `true` when a persisted edge from `follower` to `followed`
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Repository`] when lookup fails.
    pub async fn is_following(
        &self,
        follower: AccountId,
        followed: AccountId,
    ) -> AccountSessionResult<bool> {
        Ok(self.repository.is_following(follower, followed).await?)
    }

    /// Returns the account when `password` matches the stored hash.
    ///
    /// Returns `Ok(None)` for an unknown username, an empty password, or a
    /// wrong password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountSessionError::Repository`] when lookup fails, or
    /// [`AccountSessionError::Credential`] when the stored hash is not a PHC
    /// string, such as a raw value staged through [`add`](Self::add).
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> AccountSessionResult<Option<Account>> {
        let Ok(candidate) = Password::new(Some(password.to_owned())) else {
            return Ok(None);
        };
        let Some(account) = self.find_by_username(username).await? else {
            debug!(username, "authentication failed: unknown username");
            return Ok(None);
        };

        if self.hasher.verify(&candidate, account.password_hash())? {
            Ok(Some(account))
        } else {
            debug!(username, "authentication failed: password mismatch");
            Ok(None)
        }
    }
}
