//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, ExternalUserId, User, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let invalid = |err| {
        warn!(user_id = %row.id, error = %err, "stored user row failed validation");
        UserPersistenceError::query("stored user row is invalid")
    };
    let external_id = ExternalUserId::new(row.external_id.clone()).map_err(invalid)?;
    let display_name = row
        .display_name
        .clone()
        .map(DisplayName::new)
        .transpose()
        .map_err(invalid)?;
    Ok(User::new(
        UserId::from(row.id),
        external_id,
        display_name,
        row.created_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_if_absent(
        &self,
        external_id: &ExternalUserId,
        display_name: Option<DisplayName>,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            external_id: external_id.as_ref(),
            display_name: display_name.as_ref().map(AsRef::as_ref),
        };
        diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::external_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row: UserRow = users::table
            .filter(users::external_id.eq(external_id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(row)
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalUserId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::external_id.eq(external_id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Row mapping coverage; query behaviour is exercised against a live
    //! database in the integration suite.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn row(external_id: &str, display_name: Option<&str>) -> UserRow {
        UserRow {
            id: Uuid::nil(),
            external_id: external_id.to_owned(),
            display_name: display_name.map(str::to_owned),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn valid_rows_map_to_users() {
        let user = row_to_user(row("user_2abc", Some("홍길동"))).expect("valid row");
        assert_eq!(user.external_id().as_ref(), "user_2abc");
        assert_eq!(user.display_name().map(AsRef::as_ref), Some("홍길동"));
        assert_eq!(user.id().as_uuid(), &Uuid::nil());
    }

    #[rstest]
    #[case(row("", None))]
    #[case(row("user_2abc", Some("   ")))]
    fn invalid_rows_are_query_errors(#[case] row: UserRow) {
        let err = row_to_user(row).expect_err("invalid row");
        assert_eq!(err, UserPersistenceError::query("stored user row is invalid"));
    }
}
