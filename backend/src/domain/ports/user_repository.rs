//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{DisplayName, ExternalUserId, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user for `external_id` unless one exists, returning the
    /// stored row either way.
    async fn insert_if_absent(
        &self,
        external_id: &ExternalUserId,
        display_name: Option<DisplayName>,
    ) -> Result<User, UserPersistenceError>;

    /// Fetch a user by provider subject.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalUserId,
    ) -> Result<Option<User>, UserPersistenceError>;
}

/// Fixture repository with no stored users.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert_if_absent(
        &self,
        _external_id: &ExternalUserId,
        _display_name: Option<DisplayName>,
    ) -> Result<User, UserPersistenceError> {
        Err(UserPersistenceError::connection(
            "fixture user repository is read-only",
        ))
    }

    async fn find_by_external_id(
        &self,
        _external_id: &ExternalUserId,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }
}
