//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use url::Url;

use crate::domain::MapClientConfig;
use crate::domain::ports::{
    BookmarksCommand, BookmarksQuery, SitemapQuery, StatsQuery, TourCatalogue, UserSync,
};
use crate::inbound::http::auth::TokenVerifier;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Attraction listing and detail.
    pub tours: Arc<dyn TourCatalogue>,
    /// Statistics dashboard.
    pub stats: Arc<dyn StatsQuery>,
    /// Account sync.
    pub users: Arc<dyn UserSync>,
    /// Bookmark mutations.
    pub bookmarks: Arc<dyn BookmarksCommand>,
    /// Bookmark reads.
    pub bookmarks_query: Arc<dyn BookmarksQuery>,
    /// Sitemap entries.
    pub sitemap: Arc<dyn SitemapQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Attraction catalogue.
    pub tours: Arc<dyn TourCatalogue>,
    /// Statistics queries.
    pub stats: Arc<dyn StatsQuery>,
    /// Account sync.
    pub users: Arc<dyn UserSync>,
    /// Bookmark commands.
    pub bookmarks: Arc<dyn BookmarksCommand>,
    /// Bookmark queries.
    pub bookmarks_query: Arc<dyn BookmarksQuery>,
    /// Sitemap source.
    pub sitemap: Arc<dyn SitemapQuery>,
    /// Public site root used for robots.txt.
    pub site_url: Url,
    /// Browser map SDK configuration; `None` when no client id is set.
    pub map: Option<MapClientConfig>,
    /// Bearer token verifier; every caller is anonymous without one.
    pub verifier: Option<Arc<TokenVerifier>>,
}

impl HttpState {
    /// Construct state from a ports bundle and the public site URL.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mytrip::domain::ports::{
    ///     FixtureBookmarks, FixtureSitemapQuery, FixtureStatsQuery, FixtureTourCatalogue,
    ///     FixtureUserSync,
    /// };
    /// use mytrip::inbound::http::state::{HttpState, HttpStatePorts};
    /// use url::Url;
    ///
    /// let site = Url::parse("https://mytrip.example.com/")?;
    /// let ports = HttpStatePorts {
    ///     tours: Arc::new(FixtureTourCatalogue),
    ///     stats: Arc::new(FixtureStatsQuery),
    ///     users: Arc::new(FixtureUserSync),
    ///     bookmarks: Arc::new(FixtureBookmarks),
    ///     bookmarks_query: Arc::new(FixtureBookmarks),
    ///     sitemap: Arc::new(FixtureSitemapQuery::new(site.clone())),
    /// };
    /// let state = HttpState::new(ports, site);
    /// assert!(state.verifier.is_none());
    /// # Ok::<(), url::ParseError>(())
    /// ```
    pub fn new(ports: HttpStatePorts, site_url: Url) -> Self {
        let HttpStatePorts {
            tours,
            stats,
            users,
            bookmarks,
            bookmarks_query,
            sitemap,
        } = ports;
        Self {
            tours,
            stats,
            users,
            bookmarks,
            bookmarks_query,
            sitemap,
            site_url,
            map: None,
            verifier: None,
        }
    }

    /// Attach the browser map configuration.
    #[must_use]
    pub fn with_map(mut self, map: Option<MapClientConfig>) -> Self {
        self.map = map;
        self
    }

    /// Attach a bearer token verifier.
    #[must_use]
    pub fn with_verifier(mut self, verifier: TokenVerifier) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }
}
