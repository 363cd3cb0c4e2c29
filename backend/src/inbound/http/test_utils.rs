//! Shared helpers for HTTP adapter tests.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use url::Url;

use crate::domain::ports::{
    FixtureBookmarks, FixtureSitemapQuery, FixtureStatsQuery, FixtureTourCatalogue,
    FixtureUserSync,
};
use crate::inbound::http::auth::TokenVerifier;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

pub(crate) const TEST_SECRET: &str = "test-signing-secret";
pub(crate) const TEST_ISSUER: &str = "https://auth.mytrip.test";
pub(crate) const TEST_SITE: &str = "https://mytrip.example.com/";

pub(crate) fn site() -> Url {
    Url::parse(TEST_SITE).expect("valid site url")
}

/// Ports backed entirely by fixtures.
pub(crate) fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        tours: Arc::new(FixtureTourCatalogue),
        stats: Arc::new(FixtureStatsQuery),
        users: Arc::new(FixtureUserSync),
        bookmarks: Arc::new(FixtureBookmarks),
        bookmarks_query: Arc::new(FixtureBookmarks),
        sitemap: Arc::new(FixtureSitemapQuery::new(site())),
    }
}

/// State with fixture ports and a verifier for [`TEST_SECRET`].
pub(crate) fn state_with(ports: HttpStatePorts) -> HttpState {
    HttpState::new(ports, site()).with_verifier(
        TokenVerifier::new(TEST_SECRET, Some(TEST_ISSUER)).expect("test verifier"),
    )
}

pub(crate) fn test_state() -> HttpState {
    state_with(fixture_ports())
}

/// `Authorization` header value for a freshly signed token.
pub(crate) fn bearer(subject: &str, name: Option<&str>) -> String {
    let now = Utc::now().timestamp();
    let mut claims = json!({
        "sub": subject,
        "iss": TEST_ISSUER,
        "iat": now,
        "exp": now + 600,
    });
    if let Some(name) = name {
        claims["name"] = json!(name);
    }
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("sign test token");
    format!("Bearer {token}")
}
