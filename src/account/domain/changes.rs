//! Pending-write set and commit receipts.

use super::{AccountId, FollowEdge, MessageId, NewAccount, NewMessage};

/// Handle to an account staged in a [`ChangeSet`].
///
/// The handle resolves to the stored identifier through the
/// [`CommitReceipt`] returned by a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagedAccount(usize);

impl StagedAccount {
    /// Returns the position of the account in the staged order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Writes staged by a session but not yet durable.
///
/// Repositories apply a change set atomically in this order: accounts,
/// messages, follow edges added, follow edges removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    accounts: Vec<NewAccount>,
    messages: Vec<NewMessage>,
    follows: Vec<FollowEdge>,
    unfollows: Vec<FollowEdge>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a new account and returns its handle.
    pub fn stage_account(&mut self, account: NewAccount) -> StagedAccount {
        let staged = StagedAccount(self.accounts.len());
        self.accounts.push(account);
        staged
    }

    /// Stages a new message.
    pub fn stage_message(&mut self, message: NewMessage) {
        self.messages.push(message);
    }

    /// Stages a follow edge.
    pub fn stage_follow(&mut self, edge: FollowEdge) {
        self.follows.push(edge);
    }

    /// Stages removal of a follow edge.
    pub fn stage_unfollow(&mut self, edge: FollowEdge) {
        self.unfollows.push(edge);
    }

    /// Returns staged accounts in staging order.
    #[must_use]
    pub fn accounts(&self) -> &[NewAccount] {
        &self.accounts
    }

    /// Returns staged messages in staging order.
    #[must_use]
    pub fn messages(&self) -> &[NewMessage] {
        &self.messages
    }

    /// Returns staged follow edges.
    #[must_use]
    pub fn follows(&self) -> &[FollowEdge] {
        &self.follows
    }

    /// Returns staged follow-edge removals.
    #[must_use]
    pub fn unfollows(&self) -> &[FollowEdge] {
        &self.unfollows
    }

    /// Returns the total number of staged writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len() + self.messages.len() + self.follows.len() + self.unfollows.len()
    }

    /// Returns `true` when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards every staged write.
    pub fn clear(&mut self) {
        self.accounts.clear();
        self.messages.clear();
        self.follows.clear();
        self.unfollows.clear();
    }
}

/// Identifiers assigned by a successful commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReceipt {
    account_ids: Vec<AccountId>,
    message_ids: Vec<MessageId>,
}

impl CommitReceipt {
    /// Creates a receipt from identifiers listed in staging order.
    #[must_use]
    pub const fn new(account_ids: Vec<AccountId>, message_ids: Vec<MessageId>) -> Self {
        Self {
            account_ids,
            message_ids,
        }
    }

    /// Resolves a staged account handle to its stored identifier.
    #[must_use]
    pub fn account_id(&self, staged: StagedAccount) -> Option<AccountId> {
        self.account_ids.get(staged.0).copied()
    }

    /// Returns stored account identifiers in staging order.
    #[must_use]
    pub fn account_ids(&self) -> &[AccountId] {
        &self.account_ids
    }

    /// Returns stored message identifiers in staging order.
    #[must_use]
    pub fn message_ids(&self) -> &[MessageId] {
        &self.message_ids
    }
}
