//! Messages authored by accounts.

use super::{AccountDomainError, AccountId, MessageId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum number of characters in a message, matching the storage column.
pub const MAX_MESSAGE_LENGTH: usize = 140;

/// Validated message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    /// Creates validated message text.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyMessageText`] when the text is empty
    /// after trimming, or [`AccountDomainError::MessageTextTooLong`] when it
    /// exceeds [`MAX_MESSAGE_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(AccountDomainError::EmptyMessageText);
        }

        let length = raw.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(AccountDomainError::MessageTextTooLong {
                length,
                max: MAX_MESSAGE_LENGTH,
            });
        }

        Ok(Self(raw))
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Message staged for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    author: AccountId,
    text: MessageText,
    created_at: DateTime<Utc>,
}

impl NewMessage {
    /// Creates a message stamped with the current clock time.
    #[must_use]
    pub fn new(author: AccountId, text: MessageText, clock: &impl Clock) -> Self {
        Self {
            author,
            text,
            created_at: clock.utc(),
        }
    }

    /// Returns the authoring account.
    #[must_use]
    pub const fn author(&self) -> AccountId {
        self.author
    }

    /// Returns the message text.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Persisted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    id: MessageId,
    author: AccountId,
    text: MessageText,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Persisted author identifier.
    pub author: AccountId,
    /// Persisted text.
    pub text: MessageText,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            author: data.author,
            text: data.text,
            created_at: data.created_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the authoring account.
    #[must_use]
    pub const fn author(&self) -> AccountId {
        self.author
    }

    /// Returns the message text.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
