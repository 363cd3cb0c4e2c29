//! MyTrip backend entry-point: loads settings, prepares persistence and
//! serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mytrip::domain::MapClientConfig;
use mytrip::inbound::http::auth::TokenVerifier;
use mytrip::inbound::http::health::HealthState;
use mytrip::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use mytrip::outbound::tour_api::KorServiceConfig;
use mytrip::settings::AppSettings;
use server::{ServerConfig, create_server};

fn config_error(error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("configuration error: {error}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(config_error)?;
    let service_key = settings.tour_api_key().map_err(config_error)?.to_owned();
    let tour_api = KorServiceConfig::new(
        settings.tour_api_base_url().map_err(config_error)?,
        Some(service_key),
    );

    let map = settings.map_client_id().and_then(MapClientConfig::new);
    if map.is_none() {
        warn!("MYTRIP_MAP_CLIENT_ID is not set; map views are disabled");
    }

    let verifier = settings
        .auth_key()
        .map(|key| TokenVerifier::new(key, settings.auth_issuer()))
        .transpose()
        .map_err(config_error)?;
    if verifier.is_none() {
        warn!("MYTRIP_AUTH_KEY is not set; every caller is anonymous");
    }

    let mut config = ServerConfig::new(
        settings.bind_addr().map_err(config_error)?,
        settings.site_url().map_err(config_error)?,
        tour_api,
    )
    .with_map(map)
    .with_verifier(verifier);

    if let Some(database_url) = settings.database_url() {
        if settings.skip_migrations {
            info!("skipping embedded migrations");
        } else {
            run_pending_migrations(database_url)
                .await
                .map_err(|e| std::io::Error::other(format!("database migrations failed: {e}")))?;
        }
        let mut pool_config = PoolConfig::new(database_url);
        if let Some(max_size) = settings.db_max_connections {
            pool_config = pool_config.with_max_size(max_size);
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
        info!("database pool ready");
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("mytrip")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "Prometheus metrics disabled");
            None
        }
    }
}
