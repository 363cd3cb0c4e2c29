//! Application settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `MYTRIP_*` environment variables over an
//! optional configuration file. Only the tour API key is mandatory; the
//! server refuses to start without it.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::sitemap::DEFAULT_SITE_URL;
use crate::outbound::tour_api::DEFAULT_BASE_URL;

/// Listener address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings that cannot be turned into a running server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No tour API key in any layer.
    #[error("MYTRIP_TOUR_API_KEY is not set")]
    MissingTourApiKey,
    /// A URL setting does not parse.
    #[error("invalid URL for {field}: {value}")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The bind address is not `host:port`.
    #[error("invalid bind address: {0}")]
    InvalidBindAddr(String),
}

/// Runtime configuration for the MyTrip backend.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MYTRIP")]
pub struct AppSettings {
    /// Decoded KorService2 service key.
    pub tour_api_key: Option<String>,
    /// KorService2 endpoint root.
    pub tour_api_base_url: Option<String>,
    /// Naver Cloud Platform map client id.
    pub map_client_id: Option<String>,
    /// PostgreSQL connection string; fixtures back users and bookmarks when unset.
    pub database_url: Option<String>,
    /// HS256 secret or RS256 PEM public key for bearer tokens.
    pub auth_key: Option<String>,
    /// Expected `iss` claim.
    pub auth_issuer: Option<String>,
    /// Public site URL used in sitemap and robots documents.
    pub site_url: Option<String>,
    /// Listener address.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Start against an already migrated database.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|_| SettingsError::InvalidUrl {
        field,
        value: value.to_owned(),
    })
}

impl AppSettings {
    /// The tour API key, rejecting a missing or blank value.
    pub fn tour_api_key(&self) -> Result<&str, SettingsError> {
        non_blank(self.tour_api_key.as_deref()).ok_or(SettingsError::MissingTourApiKey)
    }

    /// KorService2 endpoint root, defaulting to the public gateway.
    pub fn tour_api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = non_blank(self.tour_api_base_url.as_deref()).unwrap_or(DEFAULT_BASE_URL);
        parse_url("tour_api_base_url", raw)
    }

    /// Map SDK client id, if configured.
    pub fn map_client_id(&self) -> Option<&str> {
        non_blank(self.map_client_id.as_deref())
    }

    /// Database connection string, if configured.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// Bearer token verification key, if configured.
    pub fn auth_key(&self) -> Option<&str> {
        non_blank(self.auth_key.as_deref())
    }

    /// Expected token issuer, if configured.
    pub fn auth_issuer(&self) -> Option<&str> {
        non_blank(self.auth_issuer.as_deref())
    }

    /// Site URL with a trailing slash so relative joins keep the path.
    pub fn site_url(&self) -> Result<Url, SettingsError> {
        let raw = non_blank(self.site_url.as_deref()).unwrap_or(DEFAULT_SITE_URL);
        let normalised = if raw.ends_with('/') {
            raw.to_owned()
        } else {
            format!("{raw}/")
        };
        parse_url("site_url", &normalised)
    }

    /// Listener address, defaulting to [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(self.bind_addr.as_deref()).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|_| SettingsError::InvalidBindAddr(raw.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 10] = [
        "MYTRIP_TOUR_API_KEY",
        "MYTRIP_TOUR_API_BASE_URL",
        "MYTRIP_MAP_CLIENT_ID",
        "MYTRIP_DATABASE_URL",
        "MYTRIP_AUTH_KEY",
        "MYTRIP_AUTH_ISSUER",
        "MYTRIP_SITE_URL",
        "MYTRIP_BIND_ADDR",
        "MYTRIP_SKIP_MIGRATIONS",
        "MYTRIP_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("mytrip")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.tour_api_key(), Err(SettingsError::MissingTourApiKey));
        assert_eq!(
            settings.tour_api_base_url().expect("default url").as_str(),
            DEFAULT_BASE_URL
        );
        assert_eq!(
            settings.site_url().expect("default site").as_str(),
            "https://mytrip.example.com/"
        );
        assert_eq!(
            settings.bind_addr().expect("default bind"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.map_client_id().is_none());
        assert!(settings.database_url().is_none());
        assert!(!settings.skip_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MYTRIP_TOUR_API_KEY", Some("service-key".to_owned())),
            ("MYTRIP_TOUR_API_BASE_URL", None),
            ("MYTRIP_MAP_CLIENT_ID", Some("abc123".to_owned())),
            ("MYTRIP_DATABASE_URL", Some("postgres://localhost/mytrip".to_owned())),
            ("MYTRIP_AUTH_KEY", Some("secret".to_owned())),
            ("MYTRIP_AUTH_ISSUER", Some("https://auth.mytrip.test".to_owned())),
            ("MYTRIP_SITE_URL", Some("https://trip.example.org/kr".to_owned())),
            ("MYTRIP_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("MYTRIP_SKIP_MIGRATIONS", Some("true".to_owned())),
            ("MYTRIP_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.tour_api_key(), Ok("service-key"));
        assert_eq!(settings.map_client_id(), Some("abc123"));
        assert_eq!(settings.database_url(), Some("postgres://localhost/mytrip"));
        assert_eq!(settings.auth_issuer(), Some("https://auth.mytrip.test"));
        assert_eq!(
            settings.site_url().expect("site").as_str(),
            "https://trip.example.org/kr/"
        );
        assert_eq!(
            settings.bind_addr().expect("bind"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.skip_migrations);
        assert_eq!(settings.db_max_connections, Some(4));
    }

    #[rstest]
    #[case(Some("   "))]
    #[case(Some(""))]
    #[case(None)]
    fn blank_tour_api_key_is_a_configuration_error(#[case] key: Option<&str>) {
        let settings = AppSettings {
            tour_api_key: key.map(str::to_owned),
            ..AppSettings::default()
        };
        assert_eq!(settings.tour_api_key(), Err(SettingsError::MissingTourApiKey));
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let settings = AppSettings {
            bind_addr: Some("localhost".to_owned()),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr(_))
        ));
    }
}
