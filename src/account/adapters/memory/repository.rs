//! In-memory repository for account store tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::account::{
    domain::{
        Account, AccountId, ChangeSet, CommitReceipt, Email, FollowEdge, Message, MessageId,
        NewAccount, NewMessage, PasswordHash, PersistedAccountData, PersistedMessageData,
        Username,
    },
    ports::{
        AccountRepository, AccountRepositoryError, AccountRepositoryResult, ConstraintViolation,
    },
};

/// Thread-safe in-memory account repository.
///
/// Change sets are applied to a scratch copy of the state which replaces the
/// live state only when every write succeeds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    state: Arc<RwLock<InMemoryAccountState>>,
}

#[derive(Debug, Clone, Default)]
struct InMemoryAccountState {
    accounts: BTreeMap<AccountId, StoredAccount>,
    username_index: HashMap<Username, AccountId>,
    email_index: HashMap<Email, AccountId>,
    messages: BTreeMap<MessageId, Message>,
    follows: BTreeSet<FollowEdge>,
    last_account_id: i64,
    last_message_id: i64,
}

#[derive(Debug, Clone)]
struct StoredAccount {
    username: Username,
    email: Email,
    password_hash: PasswordHash,
    profile_image_url: Option<String>,
}

impl InMemoryAccountRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryAccountState {
    fn insert_account(&mut self, account: &NewAccount) -> AccountRepositoryResult<AccountId> {
        let username = account
            .username()
            .cloned()
            .ok_or(ConstraintViolation::MissingUsername)?;
        let email = account
            .email()
            .cloned()
            .ok_or(ConstraintViolation::MissingEmail)?;

        let id = match account.id() {
            Some(requested) if self.accounts.contains_key(&requested) => {
                return Err(ConstraintViolation::DuplicateAccountId(requested).into());
            }
            Some(requested) => requested,
            None => self.next_account_id()?,
        };

        if self.username_index.contains_key(&username) {
            return Err(ConstraintViolation::DuplicateUsername(username).into());
        }
        if self.email_index.contains_key(&email) {
            return Err(ConstraintViolation::DuplicateEmail(email).into());
        }

        self.username_index.insert(username.clone(), id);
        self.email_index.insert(email.clone(), id);
        self.accounts.insert(
            id,
            StoredAccount {
                username,
                email,
                password_hash: account.password_hash().clone(),
                profile_image_url: account.profile_image_url().map(str::to_owned),
            },
        );
        Ok(id)
    }

    /// Picks the next free identifier, skipping any explicitly requested ones.
    fn next_account_id(&mut self) -> AccountRepositoryResult<AccountId> {
        loop {
            self.last_account_id += 1;
            let candidate = AccountId::new(self.last_account_id)
                .map_err(AccountRepositoryError::persistence)?;
            if !self.accounts.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
    }

    fn insert_message(&mut self, message: &NewMessage) -> AccountRepositoryResult<MessageId> {
        self.require_account(message.author())?;
        self.last_message_id += 1;
        let id =
            MessageId::new(self.last_message_id).map_err(AccountRepositoryError::persistence)?;
        let stored = Message::from_persisted(PersistedMessageData {
            id,
            author: message.author(),
            text: message.text().clone(),
            created_at: message.created_at(),
        });
        self.messages.insert(id, stored);
        Ok(id)
    }

    fn insert_follow(&mut self, edge: FollowEdge) -> AccountRepositoryResult<()> {
        self.require_account(edge.follower())?;
        self.require_account(edge.followed())?;
        if !self.follows.insert(edge) {
            return Err(ConstraintViolation::DuplicateFollow(edge).into());
        }
        Ok(())
    }

    fn require_account(&self, id: AccountId) -> AccountRepositoryResult<()> {
        if self.accounts.contains_key(&id) {
            Ok(())
        } else {
            Err(ConstraintViolation::UnknownAccount(id).into())
        }
    }

    fn apply(&mut self, changes: &ChangeSet) -> AccountRepositoryResult<CommitReceipt> {
        let account_ids = changes
            .accounts()
            .iter()
            .map(|account| self.insert_account(account))
            .collect::<AccountRepositoryResult<Vec<_>>>()?;
        let message_ids = changes
            .messages()
            .iter()
            .map(|message| self.insert_message(message))
            .collect::<AccountRepositoryResult<Vec<_>>>()?;
        for edge in changes.follows() {
            self.insert_follow(*edge)?;
        }
        for edge in changes.unfollows() {
            self.follows.remove(edge);
        }
        Ok(CommitReceipt::new(account_ids, message_ids))
    }

    fn snapshot(&self, id: AccountId) -> Option<Account> {
        let stored = self.accounts.get(&id)?;
        let following = self
            .follows
            .iter()
            .filter(|edge| edge.follower() == id)
            .map(|edge| edge.followed())
            .collect();
        let followers = self
            .follows
            .iter()
            .filter(|edge| edge.followed() == id)
            .map(|edge| edge.follower())
            .collect();
        let mut messages: Vec<Message> = self
            .messages
            .values()
            .filter(|message| message.author() == id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });

        Some(Account::from_persisted(PersistedAccountData {
            id,
            username: stored.username.clone(),
            email: stored.email.clone(),
            password_hash: stored.password_hash.clone(),
            profile_image_url: stored.profile_image_url.clone(),
            following,
            followers,
            messages,
        }))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn apply(&self, changes: &ChangeSet) -> AccountRepositoryResult<CommitReceipt> {
        let mut state = self.state.write().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let mut scratch = state.clone();
        let receipt = scratch.apply(changes)?;
        *state = scratch;
        Ok(receipt)
    }

    async fn find_by_id(&self, id: AccountId) -> AccountRepositoryResult<Option<Account>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.snapshot(id))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> AccountRepositoryResult<Option<Account>> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let account = state
            .username_index
            .get(username)
            .and_then(|id| state.snapshot(*id));
        Ok(account)
    }

    async fn is_following(
        &self,
        follower: AccountId,
        followed: AccountId,
    ) -> AccountRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            AccountRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let following = state
            .follows
            .iter()
            .any(|edge| edge.follower() == follower && edge.followed() == followed);
        Ok(following)
    }
}
