//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the bearer token security scheme.
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary for client generation.

use crate::inbound::http::bookmarks::{BookmarkStatus, BulkDeleteRequest};
use crate::inbound::http::schemas::{
    BookmarkOutcomeSchema, BookmarkedTourSchema, BulkRemoveOutcomeSchema, CoordinatesSchema,
    ErrorCodeSchema, ErrorSchema, MapClientConfigSchema, RegionStatSchema, StatsSummarySchema,
    TourSummarySchema, TypeStatSchema, UserSchema,
};
use crate::inbound::http::tours::{
    AreaResponse, PetTourResponse, TourDetailResponse, TourImageResponse, TourListResponse,
};
use crate::inbound::http::users::UserResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Session token issued by the identity provider."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "MyTrip backend API",
        description = "Korean attraction search, statistics and bookmarks backed by the \
                       Korea Tourism Organization KorService2 API."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tours::list_tours,
        crate::inbound::http::tours::get_tour,
        crate::inbound::http::tours::list_areas,
        crate::inbound::http::bookmarks::list_bookmarks,
        crate::inbound::http::bookmarks::get_bookmark,
        crate::inbound::http::bookmarks::add_bookmark,
        crate::inbound::http::bookmarks::remove_bookmark,
        crate::inbound::http::bookmarks::bulk_delete_bookmarks,
        crate::inbound::http::users::sync_current_user,
        crate::inbound::http::stats::stats_summary,
        crate::inbound::http::stats::region_stats,
        crate::inbound::http::stats::type_stats,
        crate::inbound::http::map::map_config,
        crate::inbound::http::seo::sitemap,
        crate::inbound::http::seo::robots,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        UserResponse,
        CoordinatesSchema,
        TourSummarySchema,
        TourListResponse,
        TourDetailResponse,
        TourImageResponse,
        PetTourResponse,
        AreaResponse,
        BookmarkedTourSchema,
        BookmarkOutcomeSchema,
        BulkRemoveOutcomeSchema,
        BookmarkStatus,
        BulkDeleteRequest,
        RegionStatSchema,
        TypeStatSchema,
        StatsSummarySchema,
        MapClientConfigSchema,
    )),
    tags(
        (name = "tours", description = "Attraction search, filters and details"),
        (name = "bookmarks", description = "Saved attractions of the signed-in user"),
        (name = "users", description = "Account synchronisation with the identity provider"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "map", description = "Browser map SDK configuration"),
        (name = "seo", description = "Sitemap and robots documents"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_SCHEMA_NAME: &str = "crate.domain.User";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(USER_SCHEMA_NAME, "externalId")]
    #[case(USER_SCHEMA_NAME, "displayName")]
    fn registered_schemas_use_wire_names(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/tours")]
    #[case("/api/v1/tours/{content_id}")]
    #[case("/api/v1/bookmarks/bulk-delete")]
    #[case("/api/v1/users/me/sync")]
    #[case("/api/v1/stats/summary")]
    #[case("/api/v1/map/config")]
    #[case("/sitemap.xml")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerAuth"));
    }
}
