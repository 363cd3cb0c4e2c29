//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookmarks, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub external_id: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for first-time user sync.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub external_id: &'a str,
    pub display_name: Option<&'a str>,
}

/// Row struct for reading from the bookmarks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookmarkRow {
    pub user_id: Uuid,
    pub content_id: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new bookmarks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookmarks)]
pub(crate) struct NewBookmarkRow<'a> {
    pub user_id: Uuid,
    pub content_id: &'a str,
}
