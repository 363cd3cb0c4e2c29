//! Attraction browsing endpoints.
//!
//! ```text
//! GET /api/v1/tours?keyword=궁&area=1&type=12&type=14&sort=name&page=2
//! GET /api/v1/tours/{contentId}
//! GET /api/v1/areas
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpRequest, get, web};
use pagination::{DEFAULT_PAGE_SIZE, PAGE_QUERY_PARAM, PageLinks, PageRequest, PageSlot};
use serde::Serialize;
use serde_json::json;
use url::form_urlencoded;
use utoipa::ToSchema;

use crate::domain::ports::{
    ListView, PaginationMode, TourDetailView, TourListQuery, TourListing, TourSort, TourSummary,
};
use crate::domain::{
    ContentId, ContentType, Coordinates, DetailMapView, Error, MapView, strip_html_tags,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerContext;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Parse the list page query string.
///
/// `type` may repeat; unknown content type codes are rejected. Sort, view and
/// pagination fall back to their defaults, and a missing or invalid page
/// number means the first page.
pub(crate) fn parse_list_query(raw: &str) -> Result<TourListQuery, Error> {
    let mut query = TourListQuery::default();
    let mut sort = None;
    let mut page = 1;
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let value = value.trim();
        match key.as_ref() {
            "keyword" if !value.is_empty() => query.keyword = Some(value.to_owned()),
            "area" if !value.is_empty() => query.area_code = Some(value.to_owned()),
            "type" if !value.is_empty() => {
                let content_type = ContentType::from_code(value).ok_or_else(|| {
                    Error::invalid_request(format!("unknown content type: {value}"))
                        .with_details(json!({ "field": "type", "value": value }))
                })?;
                if !query.content_types.contains(&content_type) {
                    query.content_types.push(content_type);
                }
            }
            "sort" => sort = Some(value.to_owned()),
            PAGE_QUERY_PARAM => page = value.parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1),
            "view" => {
                query.view = if value == "map" {
                    ListView::Map
                } else {
                    ListView::List
                };
            }
            "pagination" => {
                query.pagination = if value == "infinite" {
                    PaginationMode::Infinite
                } else {
                    PaginationMode::Pages
                };
            }
            _ => {}
        }
    }
    query.sort = TourSort::parse_or_default(sort.as_deref());
    query.page = PageRequest::new(page, DEFAULT_PAGE_SIZE).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "page" }))
    })?;
    Ok(query)
}

/// Response payload for the attraction list.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourListResponse {
    /// Attraction cards on this page.
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<TourSummary>,
    /// One-based page number.
    #[schema(example = 1)]
    pub page: u32,
    /// Items per page.
    #[schema(example = 12)]
    pub page_size: u32,
    /// Total attractions reported by the provider.
    #[schema(example = 128)]
    pub total_count: u64,
    /// Total number of pages.
    #[schema(example = 11)]
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_more: bool,
    /// Page-number navigation; empty for infinite scrolling.
    #[schema(value_type = Vec<Object>)]
    pub page_window: Vec<PageSlot>,
    /// Links to neighbouring pages.
    #[schema(value_type = Object)]
    pub links: PageLinks,
    /// Markers and viewport for the map view.
    #[schema(value_type = Object)]
    pub map: MapView,
    /// Keyword the results were searched with.
    pub keyword: Option<String>,
    /// Layout hint.
    #[schema(value_type = String, example = "list")]
    pub view: ListView,
    /// Navigation hint.
    #[schema(value_type = String, example = "pages")]
    pub pagination: PaginationMode,
}

impl TourListResponse {
    fn new(listing: TourListing, base: &url::Url) -> Self {
        let TourListing {
            page,
            page_window,
            map,
            keyword,
            view,
            pagination,
        } = listing;
        Self {
            links: PageLinks::for_page(base, u64::from(page.page), page.total_pages),
            items: page.items,
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_items,
            total_pages: page.total_pages,
            has_more: page.has_more,
            page_window,
            map,
            keyword,
            view,
            pagination,
        }
    }
}

/// Gallery image payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourImageResponse {
    /// Full-size image URL.
    pub origin_url: String,
    /// Thumbnail URL.
    pub small_url: Option<String>,
    /// Caption.
    pub name: Option<String>,
}

/// Pet travel payload.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetTourResponse {
    /// Leash rules.
    pub leash: Option<String>,
    /// Accepted pet sizes.
    pub size: Option<String>,
    /// Areas pets may enter.
    pub place: Option<String>,
    /// Extra fees for pets.
    pub charge: Option<String>,
    /// Pet-friendly parking.
    pub parking: Option<String>,
    /// General pet guidance.
    pub info: Option<String>,
    /// Anything else the provider lists.
    pub etc: Option<String>,
}

/// Response payload for the attraction detail page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourDetailResponse {
    /// Provider content id.
    #[schema(example = "126508")]
    pub content_id: String,
    /// Provider content type code.
    #[schema(example = "12")]
    pub content_type_id: String,
    /// Content type label.
    #[schema(example = "관광지")]
    pub content_type: Option<String>,
    /// Attraction name.
    #[schema(example = "경복궁")]
    pub title: String,
    /// Street address.
    pub address: Option<String>,
    /// Postal code.
    pub zipcode: Option<String>,
    /// Region name for the area code.
    #[schema(example = "서울")]
    pub region: Option<String>,
    /// Contact number.
    pub tel: Option<String>,
    /// Contact name.
    pub tel_name: Option<String>,
    /// Homepage markup as published by the provider.
    pub homepage: Option<String>,
    /// Description with markup removed.
    pub overview: Option<String>,
    /// Main image URL.
    pub image: Option<String>,
    /// WGS84 position.
    #[schema(value_type = Option<Object>)]
    pub coordinates: Option<Coordinates>,
    /// Provider modification timestamp, `YYYYMMDDHHmmss`.
    pub modified_time: Option<String>,
    /// Type-specific operating information keyed by provider field name.
    pub intro: Option<BTreeMap<String, String>>,
    /// Gallery images.
    pub images: Vec<TourImageResponse>,
    /// Pet travel details, when published.
    pub pet: Option<PetTourResponse>,
    /// Map marker and directions link.
    #[schema(value_type = Option<Object>)]
    pub map: Option<DetailMapView>,
    /// Whether the caller bookmarked this attraction.
    pub bookmarked: bool,
}

impl TourDetailResponse {
    fn new(view: TourDetailView, bookmarked: bool) -> Self {
        let TourDetailView {
            detail,
            intro,
            images,
            pet,
            map,
        } = view;
        let item = &detail.item;
        Self {
            content_id: item.content_id.clone(),
            content_type_id: item.content_type_id.clone(),
            content_type: item.content_type().map(|t| t.label().to_owned()),
            title: item.title.clone(),
            address: item.address(),
            zipcode: detail.zipcode.clone(),
            region: item.region_name().map(str::to_owned),
            tel: item.tel.clone(),
            tel_name: detail.tel_name.clone(),
            homepage: detail.homepage.clone(),
            overview: detail
                .overview
                .as_deref()
                .map(strip_html_tags)
                .filter(|text| !text.is_empty()),
            image: item.thumbnail().map(str::to_owned),
            coordinates: item.coordinates().ok(),
            modified_time: item.modified_time.clone(),
            intro: intro.map(|intro| intro.fields),
            images: images
                .into_iter()
                .map(|image| TourImageResponse {
                    origin_url: image.origin_url,
                    small_url: image.small_url,
                    name: image.name,
                })
                .collect(),
            pet: pet.map(|pet| PetTourResponse {
                leash: pet.leash,
                size: pet.size,
                place: pet.place,
                charge: pet.charge,
                parking: pet.parking,
                info: pet.info,
                etc: pet.etc,
            }),
            map,
            bookmarked,
        }
    }
}

/// Area filter option.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaResponse {
    /// Provider area code.
    #[schema(example = "1")]
    pub code: String,
    /// Area name.
    #[schema(example = "서울")]
    pub name: String,
}

/// List, search and filter attractions.
#[utoipa::path(
    get,
    path = "/api/v1/tours",
    params(
        ("keyword" = Option<String>, Query, description = "Keyword search; switches to searchKeyword2"),
        ("area" = Option<String>, Query, description = "Provider area code"),
        ("type" = Option<Vec<String>>, Query, description = "Content type code; may repeat"),
        ("sort" = Option<String>, Query, description = "latest (default) or name"),
        ("page" = Option<u32>, Query, description = "One-based page number"),
        ("view" = Option<String>, Query, description = "list (default) or map"),
        ("pagination" = Option<String>, Query, description = "pages (default) or infinite"),
    ),
    responses(
        (status = 200, description = "Attraction page", body = TourListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Tour provider unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tours"],
    operation_id = "listTours",
    security([])
)]
#[get("/tours")]
pub async fn list_tours(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<TourListResponse>> {
    let query = parse_list_query(req.query_string())?;
    let listing = state.tours.list_tours(&query).await?;
    Ok(web::Json(TourListResponse::new(listing, &req.full_url())))
}

/// Attraction detail with intro, gallery, pet information and map.
#[utoipa::path(
    get,
    path = "/api/v1/tours/{content_id}",
    params(("content_id" = String, Path, description = "Provider content id (digits)")),
    responses(
        (status = 200, description = "Attraction detail", body = TourDetailResponse),
        (status = 404, description = "Attraction not found", body = ErrorSchema),
        (status = 503, description = "Tour provider unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tours"],
    operation_id = "getTour",
    security((), ("BearerAuth" = []))
)]
#[get("/tours/{content_id}")]
pub async fn get_tour(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TourDetailResponse>> {
    let raw_id = path.into_inner();
    let view = state.tours.tour_detail(&raw_id).await?;
    let bookmarked = match ContentId::new(&raw_id) {
        Ok(id) => state.bookmarks_query.is_bookmarked(caller.caller(), &id).await,
        Err(_) => false,
    };
    Ok(web::Json(TourDetailResponse::new(view, bookmarked)))
}

/// Area filter options; empty when the provider is unavailable.
#[utoipa::path(
    get,
    path = "/api/v1/areas",
    responses((status = 200, description = "Area codes", body = [AreaResponse])),
    tags = ["tours"],
    operation_id = "listAreas",
    security([])
)]
#[get("/areas")]
pub async fn list_areas(state: web::Data<HttpState>) -> web::Json<Vec<AreaResponse>> {
    let areas = state
        .tours
        .area_options()
        .await
        .into_iter()
        .map(|area| AreaResponse {
            code: area.code,
            name: area.name,
        })
        .collect();
    web::Json(areas)
}

#[cfg(test)]
#[path = "tours_tests.rs"]
mod tests;
