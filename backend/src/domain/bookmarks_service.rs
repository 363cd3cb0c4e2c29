//! Bookmark service.
//!
//! Resolves the caller's provider subject to the local user row before every
//! operation and turns repository failures into friendly outcomes.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::domain::ports::{
    BookmarkRepository, BookmarkRepositoryError, BookmarkedTour, BookmarksCommand, BookmarksQuery,
    BulkRemoveOutcome, TourSource, TourSummary, UserRepository,
};
use crate::domain::user_sync_service::map_user_persistence_error;
use crate::domain::{
    ADD_FAILED_MESSAGE, Bookmark, BookmarkOutcome, BookmarkSort, Caller,
    DUPLICATE_BOOKMARK_MESSAGE, ContentId, Error, REMOVE_FAILED_MESSAGE, UserId,
};

/// Bookmark service implementing [`BookmarksCommand`] and [`BookmarksQuery`].
#[derive(Clone)]
pub struct BookmarksService<B, U, S> {
    bookmarks: Arc<B>,
    users: Arc<U>,
    tours: Arc<S>,
}

impl<B, U, S> BookmarksService<B, U, S> {
    /// Create a service over the bookmark and user stores and the provider
    /// used to hydrate bookmarked attractions.
    pub fn new(bookmarks: Arc<B>, users: Arc<U>, tours: Arc<S>) -> Self {
        Self {
            bookmarks,
            users,
            tours,
        }
    }
}

/// Order hydrated bookmarks for the bookmarks page.
pub(crate) fn sort_bookmarked(tours: &mut [BookmarkedTour], sort: BookmarkSort) {
    match sort {
        BookmarkSort::Latest => tours.sort_by_key(|entry| Reverse(entry.bookmarked_at)),
        BookmarkSort::Name => tours.sort_by(|a, b| a.tour.title.cmp(&b.tour.title)),
        BookmarkSort::Region => tours.sort_by(|a, b| {
            let region = |entry: &BookmarkedTour| {
                entry
                    .tour
                    .area_code
                    .as_deref()
                    .and_then(|code| code.parse::<u32>().ok())
                    .unwrap_or(u32::MAX)
            };
            region(a)
                .cmp(&region(b))
                .then_with(|| a.tour.title.cmp(&b.tour.title))
        }),
    }
}

impl<B, U, S> BookmarksService<B, U, S>
where
    B: BookmarkRepository,
    U: UserRepository,
    S: TourSource,
{
    /// Local user for the caller; `Ok(None)` when anonymous or unsynced.
    async fn resolve(&self, caller: &Caller) -> Result<Option<UserId>, Error> {
        let Some(identity) = caller.identity() else {
            return Ok(None);
        };
        let user = self
            .users
            .find_by_external_id(&identity.external_id)
            .await
            .map_err(map_user_persistence_error)?;
        if user.is_none() {
            debug!(external_id = %identity.external_id, "caller has no synced account");
        }
        Ok(user.map(|user| *user.id()))
    }

    async fn resolve_or_login(&self, caller: &Caller) -> Result<UserId, BookmarkOutcome> {
        match self.resolve(caller).await {
            Ok(Some(user_id)) => Ok(user_id),
            Ok(None) => Err(BookmarkOutcome::login_required()),
            Err(err) => {
                warn!(error = %err, "user lookup failed");
                Err(BookmarkOutcome::login_required())
            }
        }
    }

    async fn hydrate(&self, bookmark: &Bookmark) -> Option<BookmarkedTour> {
        match self.tours.detail_common(&bookmark.content_id).await {
            Ok(detail) => Some(BookmarkedTour {
                bookmarked_at: bookmark.created_at,
                tour: TourSummary::from(&detail.item),
            }),
            Err(err) => {
                warn!(content_id = %bookmark.content_id, error = %err, "dropping bookmark without tour details");
                None
            }
        }
    }
}

#[async_trait]
impl<B, U, S> BookmarksCommand for BookmarksService<B, U, S>
where
    B: BookmarkRepository,
    U: UserRepository,
    S: TourSource,
{
    async fn add(&self, caller: &Caller, content_id: &ContentId) -> BookmarkOutcome {
        let user_id = match self.resolve_or_login(caller).await {
            Ok(user_id) => user_id,
            Err(outcome) => return outcome,
        };
        match self.bookmarks.insert(&user_id, content_id).await {
            Ok(_) => BookmarkOutcome::ok(),
            Err(BookmarkRepositoryError::Duplicate { .. }) => {
                BookmarkOutcome::failure(DUPLICATE_BOOKMARK_MESSAGE)
            }
            Err(err) => {
                warn!(%user_id, %content_id, error = %err, "bookmark insert failed");
                BookmarkOutcome::failure(ADD_FAILED_MESSAGE)
            }
        }
    }

    async fn remove(&self, caller: &Caller, content_id: &ContentId) -> BookmarkOutcome {
        let user_id = match self.resolve_or_login(caller).await {
            Ok(user_id) => user_id,
            Err(outcome) => return outcome,
        };
        match self.bookmarks.delete(&user_id, content_id).await {
            Ok(()) => BookmarkOutcome::ok(),
            Err(err) => {
                warn!(%user_id, %content_id, error = %err, "bookmark delete failed");
                BookmarkOutcome::failure(REMOVE_FAILED_MESSAGE)
            }
        }
    }

    async fn remove_many(&self, caller: &Caller, content_ids: &[ContentId]) -> BulkRemoveOutcome {
        let user_id = match self.resolve_or_login(caller).await {
            Ok(user_id) => user_id,
            Err(outcome) => {
                return BulkRemoveOutcome {
                    success: false,
                    removed: Vec::new(),
                    failed: content_ids.iter().map(ToString::to_string).collect(),
                    error: outcome.error,
                };
            }
        };

        let user_id = &user_id;
        let results = join_all(content_ids.iter().map(|content_id| async move {
            (content_id, self.bookmarks.delete(user_id, content_id).await)
        }))
        .await;

        let mut removed = Vec::new();
        let mut failed = Vec::new();
        for (content_id, result) in results {
            match result {
                Ok(()) => removed.push(content_id.to_string()),
                Err(err) => {
                    warn!(%user_id, %content_id, error = %err, "bulk bookmark delete failed");
                    failed.push(content_id.to_string());
                }
            }
        }
        let success = failed.is_empty();
        BulkRemoveOutcome {
            success,
            removed,
            failed,
            error: (!success).then(|| REMOVE_FAILED_MESSAGE.to_owned()),
        }
    }
}

#[async_trait]
impl<B, U, S> BookmarksQuery for BookmarksService<B, U, S>
where
    B: BookmarkRepository,
    U: UserRepository,
    S: TourSource,
{
    async fn is_bookmarked(&self, caller: &Caller, content_id: &ContentId) -> bool {
        let Ok(user_id) = self.resolve_or_login(caller).await else {
            return false;
        };
        self.bookmarks
            .exists(&user_id, content_id)
            .await
            .unwrap_or_else(|err| {
                warn!(%user_id, %content_id, error = %err, "bookmark lookup failed");
                false
            })
    }

    async fn list(&self, caller: &Caller) -> Result<Vec<Bookmark>, Error> {
        let Ok(user_id) = self.resolve_or_login(caller).await else {
            return Ok(Vec::new());
        };
        Ok(self
            .bookmarks
            .list_for_user(&user_id)
            .await
            .unwrap_or_else(|err| {
                warn!(%user_id, error = %err, "bookmark list failed");
                Vec::new()
            }))
    }

    async fn bookmarked_tours(
        &self,
        caller: &Caller,
        sort: BookmarkSort,
    ) -> Result<Vec<BookmarkedTour>, Error> {
        let bookmarks = self.list(caller).await?;
        let mut tours: Vec<BookmarkedTour> =
            join_all(bookmarks.iter().map(|bookmark| self.hydrate(bookmark)))
                .await
                .into_iter()
                .flatten()
                .collect();
        sort_bookmarked(&mut tours, sort);
        Ok(tours)
    }
}

#[cfg(test)]
#[path = "bookmarks_service_tests.rs"]
mod tests;
