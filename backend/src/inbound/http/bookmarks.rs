//! Bookmark endpoints.
//!
//! ```text
//! GET    /api/v1/bookmarks?sort=latest|name|region
//! GET    /api/v1/bookmarks/{contentId}
//! PUT    /api/v1/bookmarks/{contentId}
//! DELETE /api/v1/bookmarks/{contentId}
//! POST   /api/v1/bookmarks/bulk-delete {"contentIds":["126508","264337"]}
//! ```
//!
//! Mutations answer with the outcome payload even when they fail, so the
//! client can show the message as a toast. The status code mirrors the
//! failure kind.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::BookmarkedTour;
use crate::domain::{
    BookmarkOutcome, BookmarkSort, ContentId, DUPLICATE_BOOKMARK_MESSAGE, Error,
    LOGIN_REQUIRED_MESSAGE,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerContext;
use crate::inbound::http::schemas::{
    BookmarkOutcomeSchema, BookmarkedTourSchema, BulkRemoveOutcomeSchema, ErrorSchema,
};
use crate::inbound::http::state::HttpState;

/// Largest accepted bulk removal.
pub const MAX_BULK_DELETE: usize = 100;

fn parse_content_id(raw: &str) -> Result<ContentId, Error> {
    ContentId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "contentId", "value": raw }))
    })
}

fn outcome_status(outcome: &BookmarkOutcome) -> StatusCode {
    match outcome.error.as_deref() {
        None => StatusCode::OK,
        Some(LOGIN_REQUIRED_MESSAGE) => StatusCode::UNAUTHORIZED,
        Some(DUPLICATE_BOOKMARK_MESSAGE) => StatusCode::CONFLICT,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn outcome_response(outcome: &BookmarkOutcome) -> HttpResponse {
    HttpResponse::build(outcome_status(outcome)).json(outcome)
}

/// Query parameters for the bookmark list.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct BookmarkListParams {
    /// `latest` (default), `name` or `region`.
    pub sort: Option<String>,
}

/// Whether the caller bookmarked an attraction.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookmarkStatus {
    /// `true` when the caller saved this attraction.
    pub bookmarked: bool,
}

/// Request body for bulk removal.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    /// Provider content ids to remove.
    #[schema(example = json!(["126508", "264337"]))]
    pub content_ids: Vec<String>,
}

/// The caller's bookmarks joined with attraction details.
///
/// Anonymous callers and callers without a synced account get an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/bookmarks",
    params(BookmarkListParams),
    responses(
        (status = 200, description = "Bookmarked attractions", body = [BookmarkedTourSchema]),
        (status = 503, description = "Bookmark store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["bookmarks"],
    operation_id = "listBookmarks",
    security(("BearerAuth" = []))
)]
#[get("/bookmarks")]
pub async fn list_bookmarks(
    state: web::Data<HttpState>,
    caller: CallerContext,
    params: web::Query<BookmarkListParams>,
) -> ApiResult<web::Json<Vec<BookmarkedTour>>> {
    let sort = BookmarkSort::parse_or_default(params.sort.as_deref());
    let tours = state
        .bookmarks_query
        .bookmarked_tours(caller.caller(), sort)
        .await?;
    Ok(web::Json(tours))
}

/// Bookmark state of one attraction; `false` for anonymous callers.
#[utoipa::path(
    get,
    path = "/api/v1/bookmarks/{content_id}",
    params(("content_id" = String, Path, description = "Provider content id (digits)")),
    responses(
        (status = 200, description = "Bookmark state", body = BookmarkStatus),
        (status = 400, description = "Invalid content id", body = ErrorSchema)
    ),
    tags = ["bookmarks"],
    operation_id = "getBookmark",
    security(("BearerAuth" = []))
)]
#[get("/bookmarks/{content_id}")]
pub async fn get_bookmark(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookmarkStatus>> {
    let content_id = parse_content_id(&path)?;
    let bookmarked = state
        .bookmarks_query
        .is_bookmarked(caller.caller(), &content_id)
        .await;
    Ok(web::Json(BookmarkStatus { bookmarked }))
}

/// Bookmark an attraction.
#[utoipa::path(
    put,
    path = "/api/v1/bookmarks/{content_id}",
    params(("content_id" = String, Path, description = "Provider content id (digits)")),
    responses(
        (status = 200, description = "Bookmarked", body = BookmarkOutcomeSchema),
        (status = 400, description = "Invalid content id", body = ErrorSchema),
        (status = 401, description = "Sign-in required", body = BookmarkOutcomeSchema),
        (status = 409, description = "Already bookmarked", body = BookmarkOutcomeSchema),
        (status = 500, description = "Bookmark could not be saved", body = BookmarkOutcomeSchema)
    ),
    tags = ["bookmarks"],
    operation_id = "addBookmark",
    security(("BearerAuth" = []))
)]
#[put("/bookmarks/{content_id}")]
pub async fn add_bookmark(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let content_id = parse_content_id(&path)?;
    let outcome = state.bookmarks.add(caller.caller(), &content_id).await;
    Ok(outcome_response(&outcome))
}

/// Remove a bookmark; removing a missing bookmark succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/bookmarks/{content_id}",
    params(("content_id" = String, Path, description = "Provider content id (digits)")),
    responses(
        (status = 200, description = "Removed", body = BookmarkOutcomeSchema),
        (status = 400, description = "Invalid content id", body = ErrorSchema),
        (status = 401, description = "Sign-in required", body = BookmarkOutcomeSchema),
        (status = 500, description = "Bookmark could not be removed", body = BookmarkOutcomeSchema)
    ),
    tags = ["bookmarks"],
    operation_id = "removeBookmark",
    security(("BearerAuth" = []))
)]
#[delete("/bookmarks/{content_id}")]
pub async fn remove_bookmark(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let content_id = parse_content_id(&path)?;
    let outcome = state.bookmarks.remove(caller.caller(), &content_id).await;
    Ok(outcome_response(&outcome))
}

/// Remove several bookmarks, reporting per-id failures.
#[utoipa::path(
    post,
    path = "/api/v1/bookmarks/bulk-delete",
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Removal report", body = BulkRemoveOutcomeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["bookmarks"],
    operation_id = "bulkDeleteBookmarks",
    security(("BearerAuth" = []))
)]
#[post("/bookmarks/bulk-delete")]
pub async fn bulk_delete_bookmarks(
    state: web::Data<HttpState>,
    caller: CallerContext,
    payload: web::Json<BulkDeleteRequest>,
) -> ApiResult<HttpResponse> {
    let BulkDeleteRequest { content_ids } = payload.into_inner();
    if content_ids.is_empty() {
        return Err(Error::invalid_request("contentIds must not be empty")
            .with_details(json!({ "field": "contentIds" })));
    }
    if content_ids.len() > MAX_BULK_DELETE {
        return Err(Error::invalid_request(format!(
            "at most {MAX_BULK_DELETE} bookmarks can be removed at once"
        ))
        .with_details(json!({ "field": "contentIds", "max": MAX_BULK_DELETE })));
    }
    let ids = content_ids
        .iter()
        .map(|raw| parse_content_id(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let outcome = state.bookmarks.remove_many(caller.caller(), &ids).await;
    Ok(HttpResponse::Ok().json(outcome))
}

#[cfg(test)]
#[path = "bookmarks_tests.rs"]
mod tests;
