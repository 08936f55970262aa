//! Diesel schema for account persistence.

diesel::table! {
    /// Registered accounts.
    accounts (id) {
        /// Account identifier.
        id -> Int8,
        /// Unique username.
        username -> Text,
        /// Unique email address.
        email -> Text,
        /// PHC-format password hash.
        password_hash -> Text,
        /// Optional profile image URL.
        image_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Messages authored by accounts.
    messages (id) {
        /// Message identifier.
        id -> Int8,
        /// Message body.
        #[max_length = 140]
        text -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Authoring account.
        author_id -> Int8,
    }
}

diesel::table! {
    /// Directional follow edges.
    follows (follower_id, followed_id) {
        /// Following account.
        follower_id -> Int8,
        /// Followed account.
        followed_id -> Int8,
    }
}

diesel::joinable!(messages -> accounts (author_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, follows, messages);
