//! Caller identity as established by the inbound adapter.
//!
//! The HTTP layer verifies bearer tokens; the domain only sees the resulting
//! [`Caller`], so services can treat anonymous access as ordinary data rather
//! than as a transport failure.

use super::{DisplayName, ExternalUserId};

/// Verified identity claims for a signed-in caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider subject.
    pub external_id: ExternalUserId,
    /// Display name claim, when present and valid.
    pub display_name: Option<DisplayName>,
}

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    /// No or unverifiable credentials.
    #[default]
    Anonymous,
    /// A verified provider account.
    Authenticated(Identity),
}

impl Caller {
    /// Caller for a verified subject.
    ///
    /// # Examples
    /// ```
    /// use mytrip::domain::{Caller, ExternalUserId};
    ///
    /// let caller = Caller::authenticated(ExternalUserId::new("user_2abc")?, None);
    /// assert!(caller.identity().is_some());
    /// # Ok::<(), mytrip::domain::UserValidationError>(())
    /// ```
    pub fn authenticated(external_id: ExternalUserId, display_name: Option<DisplayName>) -> Self {
        Self::Authenticated(Identity {
            external_id,
            display_name,
        })
    }

    /// Verified identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }
}
