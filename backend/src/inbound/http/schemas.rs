//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration. Each wrapper mirrors the
//! serialised shape of its domain type.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa during document generation"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency (tour provider, database) is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "관광지 정보를 찾을 수 없습니다. (contentId: 1)")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
pub struct UserSchema {
    /// Local user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Identity provider subject.
    #[schema(example = "user_2abc")]
    external_id: String,
    /// Display name from the identity provider.
    #[schema(example = "홍길동")]
    display_name: Option<String>,
    /// First sync time.
    #[schema(example = "2025-01-14T09:30:15Z")]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::BookmarkOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::BookmarkOutcome)]
pub struct BookmarkOutcomeSchema {
    /// Whether the mutation took effect.
    success: bool,
    /// Friendly failure message.
    #[schema(example = "이미 북마크된 관광지입니다.")]
    error: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::BulkRemoveOutcome`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BulkRemoveOutcome)]
pub struct BulkRemoveOutcomeSchema {
    /// Whether every requested bookmark was removed.
    success: bool,
    /// Content ids removed.
    removed: Vec<String>,
    /// Content ids whose removal failed.
    failed: Vec<String>,
    /// Friendly failure message.
    error: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Coordinates`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Coordinates)]
pub struct CoordinatesSchema {
    /// Latitude in WGS84 degrees.
    #[schema(example = 37.5788)]
    lat: f64,
    /// Longitude in WGS84 degrees.
    #[schema(example = 126.977)]
    lng: f64,
}

/// OpenAPI schema for [`crate::domain::ports::TourSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::TourSummary, rename_all = "camelCase")]
pub struct TourSummarySchema {
    #[schema(example = "126508")]
    content_id: String,
    #[schema(example = "12")]
    content_type_id: String,
    #[schema(example = "관광지")]
    content_type: Option<String>,
    #[schema(example = "경복궁")]
    title: String,
    address: Option<String>,
    area_code: Option<String>,
    #[schema(example = "서울")]
    region: Option<String>,
    thumbnail: Option<String>,
    tel: Option<String>,
    coordinates: Option<CoordinatesSchema>,
    modified_time: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ports::BookmarkedTour`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BookmarkedTour, rename_all = "camelCase")]
pub struct BookmarkedTourSchema {
    /// When the bookmark was created.
    bookmarked_at: String,
    /// Attraction card.
    tour: TourSummarySchema,
}

/// OpenAPI schema for [`crate::domain::ports::RegionStat`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::RegionStat, rename_all = "camelCase")]
pub struct RegionStatSchema {
    #[schema(example = "1")]
    area_code: String,
    #[schema(example = "서울")]
    area_name: String,
    #[schema(example = 9821)]
    count: u64,
}

/// OpenAPI schema for [`crate::domain::ports::TypeStat`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::TypeStat, rename_all = "camelCase")]
pub struct TypeStatSchema {
    #[schema(example = "12")]
    content_type_id: String,
    #[schema(example = "관광지")]
    type_name: String,
    count: u64,
    /// Share of the surviving type total, in percent.
    #[schema(example = 23.4)]
    percentage: f64,
}

/// OpenAPI schema for [`crate::domain::ports::StatsSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::StatsSummary, rename_all = "camelCase")]
pub struct StatsSummarySchema {
    total_count: u64,
    top_regions: Vec<RegionStatSchema>,
    top_types: Vec<TypeStatSchema>,
    #[schema(example = "2025-05-01T12:00:00Z")]
    last_updated: String,
}

/// OpenAPI schema for [`crate::domain::MapClientConfig`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MapClientConfig, rename_all = "camelCase")]
pub struct MapClientConfigSchema {
    client_id: String,
    #[schema(example = "https://oapi.map.naver.com/openapi/v3/maps.js?ncpKeyId=abc123")]
    script_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("forbidden")]
    #[case("not_found")]
    #[case("conflict")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_every_domain_code(#[case] code: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(code), "missing {code}");
    }

    #[rstest]
    fn bookmarked_tour_schema_nests_summary() {
        let schema_json = schema_to_json::<BookmarkedTourSchema>();
        assert!(schema_json.contains("bookmarkedAt"));
        assert!(schema_json.contains("crate.domain.ports.TourSummary"));
    }
}
