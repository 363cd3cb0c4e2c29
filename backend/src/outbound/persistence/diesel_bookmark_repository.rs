//! PostgreSQL-backed `BookmarkRepository` implementation using Diesel ORM.
//!
//! The `(user_id, content_id)` primary key enforces one bookmark per
//! attraction; its unique violation is reported as
//! [`BookmarkRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{BookmarkRepository, BookmarkRepositoryError};
use crate::domain::{Bookmark, ContentId, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{BookmarkRow, NewBookmarkRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookmarks;

/// Diesel-backed implementation of the `BookmarkRepository` port.
#[derive(Clone)]
pub struct DieselBookmarkRepository {
    pool: DbPool,
}

impl DieselBookmarkRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookmarkRepositoryError {
    map_basic_pool_error(error, BookmarkRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookmarkRepositoryError {
    map_basic_diesel_error(
        error,
        BookmarkRepositoryError::query,
        BookmarkRepositoryError::connection,
    )
}

fn row_to_bookmark(row: BookmarkRow) -> Result<Bookmark, BookmarkRepositoryError> {
    let content_id = ContentId::new(row.content_id.as_str()).map_err(|err| {
        warn!(content_id = %row.content_id, error = %err, "stored bookmark row failed validation");
        BookmarkRepositoryError::query("stored bookmark row is invalid")
    })?;
    Ok(Bookmark {
        user_id: UserId::from(row.user_id),
        content_id,
        created_at: row.created_at,
    })
}

#[async_trait]
impl BookmarkRepository for DieselBookmarkRepository {
    async fn exists(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<bool, BookmarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            bookmarks::table
                .filter(bookmarks::user_id.eq(user_id.as_uuid()))
                .filter(bookmarks::content_id.eq(content_id.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<Bookmark, BookmarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewBookmarkRow {
            user_id: *user_id.as_uuid(),
            content_id: content_id.as_str(),
        };
        let row: BookmarkRow = diesel::insert_into(bookmarks::table)
            .values(&new_row)
            .returning(BookmarkRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    BookmarkRepositoryError::duplicate(content_id.as_str())
                } else {
                    map_diesel_error(error)
                }
            })?;
        row_to_bookmark(row)
    }

    async fn delete(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<(), BookmarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            bookmarks::table
                .filter(bookmarks::user_id.eq(user_id.as_uuid()))
                .filter(bookmarks::content_id.eq(content_id.as_str())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Bookmark>, BookmarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookmarkRow> = bookmarks::table
            .filter(bookmarks::user_id.eq(user_id.as_uuid()))
            .order(bookmarks::created_at.desc())
            .select(BookmarkRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_bookmark).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn rows_map_to_bookmarks() {
        let bookmark = row_to_bookmark(BookmarkRow {
            user_id: Uuid::nil(),
            content_id: "126508".to_owned(),
            created_at: Utc::now(),
        })
        .expect("valid row");
        assert_eq!(bookmark.content_id.as_str(), "126508");
        assert_eq!(bookmark.user_id.as_uuid(), &Uuid::nil());
    }

    #[rstest]
    fn non_numeric_content_ids_are_rejected() {
        let err = row_to_bookmark(BookmarkRow {
            user_id: Uuid::nil(),
            content_id: "abc".to_owned(),
            created_at: Utc::now(),
        })
        .expect_err("invalid row");
        assert_eq!(err, BookmarkRepositoryError::query("stored bookmark row is invalid"));
    }
}
