//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use mytrip::Trace;
#[cfg(debug_assertions)]
use mytrip::doc::ApiDoc;
use mytrip::inbound::http::bookmarks::{
    add_bookmark, bulk_delete_bookmarks, get_bookmark, list_bookmarks, remove_bookmark,
};
use mytrip::inbound::http::error::{json_config, path_config, query_config};
use mytrip::inbound::http::health::{HealthState, live, ready};
use mytrip::inbound::http::map::map_config;
use mytrip::inbound::http::seo::{robots, sitemap};
use mytrip::inbound::http::state::HttpState;
use mytrip::inbound::http::stats::{region_stats, stats_summary, type_stats};
use mytrip::inbound::http::tours::{get_tour, list_areas, list_tours};
use mytrip::inbound::http::users::sync_current_user;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    // bulk-delete is registered before the `{content_id}` routes
    let api = web::scope("/api/v1")
        .service(list_tours)
        .service(get_tour)
        .service(list_areas)
        .service(list_bookmarks)
        .service(bulk_delete_bookmarks)
        .service(get_bookmark)
        .service(add_bookmark)
        .service(remove_bookmark)
        .service(sync_current_user)
        .service(stats_summary)
        .service(region_stats)
        .service(type_stats)
        .service(map_config);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(sitemap)
        .service(robots)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the tour API client cannot be built or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from(config.prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Route table coverage through the assembled application.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use mytrip::outbound::tour_api::{DEFAULT_BASE_URL, KorServiceConfig};
    use rstest::rstest;
    use url::Url;

    fn deps() -> AppDependencies {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("addr"),
            Url::parse("https://mytrip.example.com/").expect("site"),
            KorServiceConfig::new(Url::parse(DEFAULT_BASE_URL).expect("base"), None),
        );
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config).expect("state"),
        }
    }

    #[rstest]
    #[case("/health/live", StatusCode::OK)]
    #[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case("/robots.txt", StatusCode::OK)]
    #[case("/api/v1/map/config", StatusCode::SERVICE_UNAVAILABLE)]
    #[case("/api/v1/bookmarks", StatusCode::OK)]
    #[case("/api/v1/tours/not-a-number", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn routes_are_mounted(#[case] uri: &str, #[case] status: StatusCode) {
        let app = actix_test::init_service(build_app(deps())).await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), status, "{uri}");
        assert!(response.headers().contains_key("trace-id"));
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_sync_is_unauthorized() {
        let app = actix_test::init_service(build_app(deps())).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/me/sync")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
