//! Driving ports for bookmark mutations and queries.
//!
//! Every call carries the [`Caller`]; anonymous callers and callers without a
//! synced account get the login prompt (mutations) or empty results
//! (queries) rather than an error response.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ports::TourSummary;
use crate::domain::{Bookmark, BookmarkOutcome, BookmarkSort, Caller, ContentId, Error};

/// Result of a bulk removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRemoveOutcome {
    /// Whether every requested bookmark was removed.
    pub success: bool,
    /// Content ids removed.
    pub removed: Vec<String>,
    /// Content ids whose removal failed.
    pub failed: Vec<String>,
    /// Friendly failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Bookmark joined with the attraction it points at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedTour {
    /// When the bookmark was created.
    pub bookmarked_at: DateTime<Utc>,
    /// Attraction card.
    pub tour: TourSummary,
}

/// Domain use-case port for bookmark mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarksCommand: Send + Sync {
    /// Bookmark an attraction.
    async fn add(&self, caller: &Caller, content_id: &ContentId) -> BookmarkOutcome;

    /// Remove a bookmark; removing a missing bookmark succeeds.
    async fn remove(&self, caller: &Caller, content_id: &ContentId) -> BookmarkOutcome;

    /// Remove several bookmarks, reporting per-id failures.
    async fn remove_many(&self, caller: &Caller, content_ids: &[ContentId]) -> BulkRemoveOutcome;
}

/// Domain use-case port for bookmark reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarksQuery: Send + Sync {
    /// Whether the caller bookmarked `content_id`; `false` on any failure.
    async fn is_bookmarked(&self, caller: &Caller, content_id: &ContentId) -> bool;

    /// The caller's bookmarks, newest first.
    async fn list(&self, caller: &Caller) -> Result<Vec<Bookmark>, Error>;

    /// The caller's bookmarks hydrated with attraction details.
    async fn bookmarked_tours(
        &self,
        caller: &Caller,
        sort: BookmarkSort,
    ) -> Result<Vec<BookmarkedTour>, Error>;
}

/// Fixture bookmarks that always ask the caller to sign in.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookmarks;

#[async_trait]
impl BookmarksCommand for FixtureBookmarks {
    async fn add(&self, _caller: &Caller, _content_id: &ContentId) -> BookmarkOutcome {
        BookmarkOutcome::login_required()
    }

    async fn remove(&self, _caller: &Caller, _content_id: &ContentId) -> BookmarkOutcome {
        BookmarkOutcome::login_required()
    }

    async fn remove_many(
        &self,
        _caller: &Caller,
        content_ids: &[ContentId],
    ) -> BulkRemoveOutcome {
        BulkRemoveOutcome {
            success: false,
            removed: Vec::new(),
            failed: content_ids.iter().map(ToString::to_string).collect(),
            error: BookmarkOutcome::login_required().error,
        }
    }
}

#[async_trait]
impl BookmarksQuery for FixtureBookmarks {
    async fn is_bookmarked(&self, _caller: &Caller, _content_id: &ContentId) -> bool {
        false
    }

    async fn list(&self, _caller: &Caller) -> Result<Vec<Bookmark>, Error> {
        Ok(Vec::new())
    }

    async fn bookmarked_tours(
        &self,
        _caller: &Caller,
        _sort: BookmarkSort,
    ) -> Result<Vec<BookmarkedTour>, Error> {
        Ok(Vec::new())
    }
}
