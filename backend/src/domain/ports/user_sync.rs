//! Driving port for mirroring provider accounts into local users.

use async_trait::async_trait;

use crate::domain::{Error, ExternalUserId, Identity, User, UserId};

/// Domain use-case port for account synchronisation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSync: Send + Sync {
    /// Create the local row on first call and return the stored row after.
    async fn sync(&self, identity: &Identity) -> Result<User, Error>;

    /// Local identifier for a provider subject, if the account was synced.
    async fn resolve(&self, external_id: &ExternalUserId) -> Result<Option<UserId>, Error>;
}

/// Fixture sync that never finds or stores users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserSync;

#[async_trait]
impl UserSync for FixtureUserSync {
    async fn sync(&self, _identity: &Identity) -> Result<User, Error> {
        Err(Error::service_unavailable("user storage is not configured"))
    }

    async fn resolve(&self, _external_id: &ExternalUserId) -> Result<Option<UserId>, Error> {
        Ok(None)
    }
}
