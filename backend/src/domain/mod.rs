//! Domain primitives, services and ports.
//!
//! Purpose: model tourism records from the provider, the caller's bookmarks
//! and the view models served to the pages. Services depend only on the
//! traits in [`ports`]; adapters live under `outbound` and `inbound`.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TourItem, TourDetail and friends for provider records.
//! - Bookmark, BookmarkOutcome for saved attractions and mutation results.
//! - MapView, DetailMapView for marker and centre data for the map widgets.
//! - *Service types for use-case implementations behind the driving ports.

mod auth;
mod bookmark;
mod bookmarks_service;
pub mod coordinates;
pub mod error;
mod map;
pub mod ports;
mod seo_service;
pub mod sitemap;
mod stats_service;
mod tour;
mod tour_catalogue_service;
mod trace_id;
pub mod user;
pub(crate) mod user_sync_service;

pub use self::auth::{Caller, Identity};
pub use self::bookmark::{
    ADD_FAILED_MESSAGE, Bookmark, BookmarkOutcome, BookmarkSort, DUPLICATE_BOOKMARK_MESSAGE,
    LOGIN_REQUIRED_MESSAGE, REMOVE_FAILED_MESSAGE,
};
pub use self::bookmarks_service::BookmarksService;
pub use self::coordinates::{CoordinateEncoding, CoordinateError, Coordinates};
pub use self::error::{Error, ErrorCode};
pub use self::map::{
    DETAIL_ZOOM, DetailMapView, MAP_KEY_MISSING_MESSAGE, MapClientConfig, MapMarker, MapView,
    NAVER_MAP_SCRIPT_URL, directions_url,
};
pub use self::seo_service::{SITEMAP_AREAS, SITEMAP_ROWS, SeoService};
pub use self::stats_service::{StatsService, TOP_N};
pub use self::tour::{
    AreaCode, ContentId, ContentIdError, ContentType, PROVIDER_TIMESTAMP_FORMAT, PetTourInfo,
    REGIONS, Region, TourDetail, TourImage, TourIntro, TourItem, is_valid_image_url,
    parse_provider_timestamp, region_name, strip_html_tags,
};
pub use self::tour_catalogue_service::{PAGE_WINDOW_SIZE, TourCatalogueService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, ExternalUserId, User, UserId, UserValidationError};
pub use self::user_sync_service::UserSyncService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use mytrip::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("관광지를 찾을 수 없습니다."))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
