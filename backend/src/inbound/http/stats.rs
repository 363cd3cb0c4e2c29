//! Statistics dashboard endpoints.
//!
//! ```text
//! GET /api/v1/stats/summary
//! GET /api/v1/stats/regions
//! GET /api/v1/stats/types
//! ```
//!
//! Region and type counts degrade to the branches that answered; the summary
//! fails only when every branch failed.

use actix_web::{get, web};

use crate::domain::ports::{RegionStat, StatsSummary, TypeStat};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, RegionStatSchema, StatsSummarySchema, TypeStatSchema,
};
use crate::inbound::http::state::HttpState;

/// Dashboard summary: total, top regions and top types.
#[utoipa::path(
    get,
    path = "/api/v1/stats/summary",
    responses(
        (status = 200, description = "Dashboard summary", body = StatsSummarySchema),
        (status = 503, description = "Tour provider unavailable", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "statsSummary",
    security([])
)]
#[get("/stats/summary")]
pub async fn stats_summary(state: web::Data<HttpState>) -> ApiResult<web::Json<StatsSummary>> {
    Ok(web::Json(state.stats.summary().await?))
}

/// Attraction counts per region, largest first.
#[utoipa::path(
    get,
    path = "/api/v1/stats/regions",
    responses((status = 200, description = "Region counts", body = [RegionStatSchema])),
    tags = ["stats"],
    operation_id = "statsRegions",
    security([])
)]
#[get("/stats/regions")]
pub async fn region_stats(state: web::Data<HttpState>) -> web::Json<Vec<RegionStat>> {
    web::Json(state.stats.region_stats().await)
}

/// Attraction counts and shares per content type.
#[utoipa::path(
    get,
    path = "/api/v1/stats/types",
    responses((status = 200, description = "Content type counts", body = [TypeStatSchema])),
    tags = ["stats"],
    operation_id = "statsTypes",
    security([])
)]
#[get("/stats/types")]
pub async fn type_stats(state: web::Data<HttpState>) -> web::Json<Vec<TypeStat>> {
    web::Json(state.stats.type_stats().await)
}
