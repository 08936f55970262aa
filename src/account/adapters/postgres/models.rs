//! Diesel row models for account persistence.

use super::schema::{accounts, follows, messages};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for account records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    /// Account identifier.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// PHC-format password hash.
    pub password_hash: String,
    /// Optional profile image URL.
    pub image_url: Option<String>,
}

/// Insert model for account records.
///
/// `None` in `id`, `username`, or `email` emits `DEFAULT`, so missing names
/// are rejected by the `NOT NULL` constraints and a missing id falls back to
/// the identity sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow {
    /// Requested account identifier.
    pub id: Option<i64>,
    /// Username, if supplied.
    pub username: Option<String>,
    /// Email address, if supplied.
    pub email: Option<String>,
    /// PHC-format password hash.
    pub password_hash: String,
    /// Optional profile image URL.
    pub image_url: Option<String>,
}

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    pub id: i64,
    /// Message body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Authoring account.
    pub author_id: i64,
}

/// Insert model for message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Message body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Authoring account.
    pub author_id: i64,
}

/// Insert model for follow edges.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = follows)]
pub struct FollowRow {
    /// Following account.
    pub follower_id: i64,
    /// Followed account.
    pub followed_id: i64,
}
