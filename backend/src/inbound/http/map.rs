//! Browser map SDK configuration.

use actix_web::{get, web};

use crate::domain::{Error, MAP_KEY_MISSING_MESSAGE, MapClientConfig};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MapClientConfigSchema};
use crate::inbound::http::state::HttpState;

/// Client id and script URL for the Naver map SDK.
///
/// Answers 503 with a friendly message when no client id is configured so
/// the page can render its fallback instead of a broken map.
#[utoipa::path(
    get,
    path = "/api/v1/map/config",
    responses(
        (status = 200, description = "Map SDK configuration", body = MapClientConfigSchema),
        (status = 503, description = "Map client id not configured", body = ErrorSchema)
    ),
    tags = ["map"],
    operation_id = "mapConfig",
    security([])
)]
#[get("/map/config")]
pub async fn map_config(state: web::Data<HttpState>) -> ApiResult<web::Json<MapClientConfig>> {
    state
        .map
        .clone()
        .map(web::Json)
        .ok_or_else(|| Error::service_unavailable(MAP_KEY_MISSING_MESSAGE))
}
