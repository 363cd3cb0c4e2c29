//! Port abstraction for bookmark persistence.
//!
//! Adapters report a uniqueness conflict as
//! [`BookmarkRepositoryError::Duplicate`] so the domain can turn it into a
//! friendly message instead of a generic failure.

use async_trait::async_trait;

use crate::domain::{Bookmark, ContentId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by bookmark repository adapters.
    pub enum BookmarkRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "bookmark repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "bookmark repository query failed: {message}",
        /// The user already bookmarked this attraction.
        Duplicate { content_id: String } => "bookmark already exists for content {content_id}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Whether `user_id` has bookmarked `content_id`.
    async fn exists(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<bool, BookmarkRepositoryError>;

    /// Insert a bookmark.
    async fn insert(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<Bookmark, BookmarkRepositoryError>;

    /// Delete a bookmark; deleting a missing row succeeds.
    async fn delete(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<(), BookmarkRepositoryError>;

    /// All bookmarks for `user_id`, newest first.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<Bookmark>, BookmarkRepositoryError>;
}

/// Fixture repository with no stored bookmarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureBookmarkRepository;

#[async_trait]
impl BookmarkRepository for FixtureBookmarkRepository {
    async fn exists(
        &self,
        _user_id: &UserId,
        _content_id: &ContentId,
    ) -> Result<bool, BookmarkRepositoryError> {
        Ok(false)
    }

    async fn insert(
        &self,
        _user_id: &UserId,
        _content_id: &ContentId,
    ) -> Result<Bookmark, BookmarkRepositoryError> {
        Err(BookmarkRepositoryError::connection(
            "fixture bookmark repository is read-only",
        ))
    }

    async fn delete(
        &self,
        _user_id: &UserId,
        _content_id: &ContentId,
    ) -> Result<(), BookmarkRepositoryError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Bookmark>, BookmarkRepositoryError> {
        Ok(Vec::new())
    }
}
