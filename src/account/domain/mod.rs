//! Domain model for accounts, messages, and follow edges.
//!
//! The account domain models signup input, persisted account snapshots, and
//! the staged change set that a session hands to the repository. All
//! infrastructure concerns, including password hashing, live outside the
//! domain boundary.

mod account;
mod changes;
mod credentials;
mod error;
mod follow;
mod ids;
mod message;

pub use account::{
    Account, DEFAULT_PROFILE_IMAGE_URL, Email, NewAccount, PersistedAccountData, Username,
};
pub use changes::{ChangeSet, CommitReceipt, StagedAccount};
pub use credentials::{Password, PasswordHash};
pub use error::AccountDomainError;
pub use follow::FollowEdge;
pub use ids::{AccountId, MessageId};
pub use message::{MAX_MESSAGE_LENGTH, Message, MessageText, NewMessage, PersistedMessageData};
