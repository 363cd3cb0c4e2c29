//! Account synchronisation service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository, UserSync};
use crate::domain::{Error, ExternalUserId, Identity, User, UserId};

/// Service implementing [`UserSync`] over a [`UserRepository`].
#[derive(Clone)]
pub struct UserSyncService<R> {
    users: Arc<R>,
}

impl<R> UserSyncService<R> {
    /// Create a service backed by `users`.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> UserSync for UserSyncService<R>
where
    R: UserRepository,
{
    async fn sync(&self, identity: &Identity) -> Result<User, Error> {
        let user = self
            .users
            .insert_if_absent(&identity.external_id, identity.display_name.clone())
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user synced");
        Ok(user)
    }

    async fn resolve(&self, external_id: &ExternalUserId) -> Result<Option<UserId>, Error> {
        self.users
            .find_by_external_id(external_id)
            .await
            .map(|user| user.map(|user| *user.id()))
            .map_err(map_user_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{DisplayName, ErrorCode};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn identity() -> Identity {
        Identity {
            external_id: ExternalUserId::new("user_2abc").expect("subject"),
            display_name: Some(DisplayName::new("홍길동").expect("name")),
        }
    }

    fn stored(identity: &Identity) -> User {
        User::new(
            UserId::random(),
            identity.external_id.clone(),
            identity.display_name.clone(),
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn sync_returns_stored_row(identity: Identity) {
        let expected = stored(&identity);
        let returned = expected.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_insert_if_absent()
            .withf(|external_id, name| {
                external_id.as_ref() == "user_2abc"
                    && name.as_ref().map(AsRef::as_ref) == Some("홍길동")
            })
            .times(1)
            .return_once(move |_, _| Ok(returned));

        let user = UserSyncService::new(Arc::new(repo))
            .sync(&identity)
            .await
            .expect("sync succeeds");
        assert_eq!(user, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn sync_maps_connection_failures(identity: Identity) {
        let mut repo = MockUserRepository::new();
        repo.expect_insert_if_absent()
            .return_once(|_, _| Err(UserPersistenceError::connection("refused")));

        let err = UserSyncService::new(Arc::new(repo))
            .sync(&identity)
            .await
            .expect_err("connection failure");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_returns_local_id(identity: Identity) {
        let user = stored(&identity);
        let expected = *user.id();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_external_id()
            .return_once(move |_| Ok(Some(user)));

        let resolved = UserSyncService::new(Arc::new(repo))
            .resolve(&identity.external_id)
            .await
            .expect("resolve succeeds");
        assert_eq!(resolved, Some(expected));
    }
}
