//! Bookmark records and the outcome type returned by bookmark mutations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ContentId, UserId};

/// Shown when the caller has no session or no synced user row.
pub const LOGIN_REQUIRED_MESSAGE: &str = "로그인이 필요합니다.";
/// Shown when the attraction is already bookmarked.
pub const DUPLICATE_BOOKMARK_MESSAGE: &str = "이미 북마크된 관광지입니다.";
/// Shown when adding a bookmark fails for any other reason.
pub const ADD_FAILED_MESSAGE: &str = "북마크 추가에 실패했습니다.";
/// Shown when removing a bookmark fails.
pub const REMOVE_FAILED_MESSAGE: &str = "북마크 제거에 실패했습니다.";

/// One saved attraction.
///
/// Unique per `(user_id, content_id)`; bookmarks are created and deleted,
/// never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Owning user.
    pub user_id: UserId,
    /// Bookmarked attraction.
    pub content_id: ContentId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Result of a bookmark mutation.
///
/// Failures are reported as data so callers can show the message as a toast
/// without treating them as request errors.
///
/// # Examples
/// ```
/// use mytrip::domain::BookmarkOutcome;
///
/// let outcome = BookmarkOutcome::failure("로그인이 필요합니다.");
/// assert!(!outcome.success);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkOutcome {
    /// Whether the mutation took effect.
    pub success: bool,
    /// Friendly failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookmarkOutcome {
    /// Successful outcome.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Failed outcome carrying a friendly message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }

    /// Failed outcome for callers without a synced account.
    pub fn login_required() -> Self {
        Self::failure(LOGIN_REQUIRED_MESSAGE)
    }
}

/// Ordering applied to the bookmarks page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookmarkSort {
    /// Most recently bookmarked first.
    #[default]
    Latest,
    /// Title ascending.
    Name,
    /// Area code ascending, then title.
    Region,
}

impl BookmarkSort {
    /// Parse a query value, falling back to [`BookmarkSort::Latest`].
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("name") => Self::Name,
            Some("region") => Self::Region,
            _ => Self::Latest,
        }
    }
}
