//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command regenerates them from a live database.

diesel::table! {
    /// Users mirrored from the identity provider.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Provider subject; unique.
        external_id -> Varchar,
        /// Optional display name (max 64 characters).
        display_name -> Nullable<Varchar>,
        /// First sync timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Saved attractions, one row per user and content id.
    bookmarks (user_id, content_id) {
        /// Owning user.
        user_id -> Uuid,
        /// Provider content identifier (digits only).
        content_id -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(bookmarks -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(bookmarks, users);
