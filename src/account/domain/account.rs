//! Account aggregate, signup record, and identity scalars.

use super::{AccountId, Message, PasswordHash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Profile image shown when an account has not set its own.
pub const DEFAULT_PROFILE_IMAGE_URL: &str = "/static/images/default-pic.png";

/// Account username.
///
/// Any string is accepted at construction time; uniqueness is a storage rule
/// checked when staged writes are committed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Wraps a username.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account email address.
///
/// Like [`Username`], only uniqueness is enforced, and only at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Wraps an email address.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account record staged for insertion.
///
/// Username and email are optional here so that missing values surface as
/// constraint violations at commit, the same way the relational store reports
/// a `NOT NULL` failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    id: Option<AccountId>,
    username: Option<Username>,
    email: Option<Email>,
    password_hash: PasswordHash,
    profile_image_url: Option<String>,
}

impl NewAccount {
    /// Creates an account record with a store-assigned identifier.
    #[must_use]
    pub const fn new(
        username: Option<Username>,
        email: Option<Email>,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id: None,
            username,
            email,
            password_hash,
            profile_image_url: None,
        }
    }

    /// Requests an explicit identifier instead of a store-assigned one.
    #[must_use]
    pub const fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the profile image URL.
    #[must_use]
    pub fn with_profile_image_url(mut self, url: impl Into<String>) -> Self {
        self.profile_image_url = Some(url.into());
        self
    }

    /// Returns the requested identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<AccountId> {
        self.id
    }

    /// Returns the username, if supplied.
    #[must_use]
    pub const fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    /// Returns the email, if supplied.
    #[must_use]
    pub const fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Returns the password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the profile image URL, if supplied.
    #[must_use]
    pub fn profile_image_url(&self) -> Option<&str> {
        self.profile_image_url.as_deref()
    }
}

/// Persisted account snapshot including its relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    username: Username,
    email: Email,
    #[serde(skip)]
    password_hash: PasswordHash,
    profile_image_url: Option<String>,
    following: BTreeSet<AccountId>,
    followers: BTreeSet<AccountId>,
    messages: Vec<Message>,
}

/// Parameter object for reconstructing a persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAccountData {
    /// Persisted account identifier.
    pub id: AccountId,
    /// Persisted username.
    pub username: Username,
    /// Persisted email.
    pub email: Email,
    /// Persisted password hash.
    pub password_hash: PasswordHash,
    /// Persisted profile image URL, if any.
    pub profile_image_url: Option<String>,
    /// Accounts this account follows.
    pub following: BTreeSet<AccountId>,
    /// Accounts following this account.
    pub followers: BTreeSet<AccountId>,
    /// Messages authored by this account, newest first.
    pub messages: Vec<Message>,
}

impl Account {
    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAccountData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            profile_image_url: data.profile_image_url,
            following: data.following,
            followers: data.followers,
            messages: data.messages,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the profile image URL, if set.
    #[must_use]
    pub fn profile_image_url(&self) -> Option<&str> {
        self.profile_image_url.as_deref()
    }

    /// Returns the profile image URL, falling back to the default image.
    #[must_use]
    pub fn profile_image_url_or_default(&self) -> &str {
        self.profile_image_url().unwrap_or(DEFAULT_PROFILE_IMAGE_URL)
    }

    /// Returns the identifiers of accounts this account follows.
    #[must_use]
    pub const fn following(&self) -> &BTreeSet<AccountId> {
        &self.following
    }

    /// Returns the identifiers of accounts following this account.
    #[must_use]
    pub const fn followers(&self) -> &BTreeSet<AccountId> {
        &self.followers
    }

    /// Returns messages authored by this account, newest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns `true` when this account follows `other`.
    #[must_use]
    pub fn is_following(&self, other: &Self) -> bool {
        self.following.contains(&other.id)
    }

    /// Returns `true` when `other` follows this account.
    #[must_use]
    pub fn is_followed_by(&self, other: &Self) -> bool {
        self.followers.contains(&other.id)
    }
}
