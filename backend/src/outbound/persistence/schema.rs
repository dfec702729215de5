//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle (max 150 characters).
        username -> Varchar,
        /// Argon2id hash in PHC string format.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Bumped on logout; sessions carrying an older value are rejected.
        session_generation -> Int8,
    }
}

diesel::table! {
    /// Directed follow edges; the composite key forbids duplicates.
    follows (follower_id, following_id) {
        /// User doing the following.
        follower_id -> Uuid,
        /// User being followed.
        following_id -> Uuid,
        /// Edge creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Documents owned by users.
    documents (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Display title.
        title -> Text,
        /// Whether non-owners may list the document.
        is_public -> Bool,
        /// Creation timestamp; listings are newest first.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(documents -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, follows, documents);
