//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use url::Url;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use mytrip::domain::MapClientConfig;
use mytrip::inbound::http::auth::TokenVerifier;
use mytrip::outbound::persistence::DbPool;
use mytrip::outbound::tour_api::KorServiceConfig;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) site_url: Url,
    pub(crate) tour_api: KorServiceConfig,
    pub(crate) map: Option<MapClientConfig>,
    pub(crate) verifier: Option<TokenVerifier>,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Configuration with fixture-backed users and bookmarks, no map and
    /// no token verification.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, site_url: Url, tour_api: KorServiceConfig) -> Self {
        Self {
            bind_addr,
            site_url,
            tour_api,
            map: None,
            verifier: None,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for the user and bookmark stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Publish the browser map configuration.
    #[must_use]
    pub fn with_map(mut self, map: Option<MapClientConfig>) -> Self {
        self.map = map;
        self
    }

    /// Verify bearer tokens; without a verifier every caller is anonymous.
    #[must_use]
    pub fn with_verifier(mut self, verifier: Option<TokenVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
