//! Builders wiring domain services to the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use mytrip::domain::ports::{
    BookmarksCommand, BookmarksQuery, FixtureBookmarks, FixtureUserSync, UserSync,
};
use mytrip::domain::{
    BookmarksService, SeoService, StatsService, TourCatalogueService, UserSyncService,
};
use mytrip::inbound::http::state::{HttpState, HttpStatePorts};
use mytrip::outbound::persistence::{DbPool, DieselBookmarkRepository, DieselUserRepository};
use mytrip::outbound::tour_api::KorServiceSource;

use super::ServerConfig;

/// Build a command/query service pair using the real service when a pool is
/// available, otherwise using fixture implementations.
fn build_service_pair<S, Cmd, Query>(
    pool: Option<&DbPool>,
    make_service: impl FnOnce(&DbPool) -> S,
    fixtures: (Arc<Cmd>, Arc<Query>),
    cast: fn(Arc<S>) -> (Arc<Cmd>, Arc<Query>),
) -> (Arc<Cmd>, Arc<Query>)
where
    S: 'static,
    Cmd: ?Sized + 'static,
    Query: ?Sized + 'static,
{
    match pool {
        Some(pool) => cast(Arc::new(make_service(pool))),
        None => fixtures,
    }
}

fn build_user_sync(pool: Option<&DbPool>) -> Arc<dyn UserSync> {
    match pool {
        Some(pool) => Arc::new(UserSyncService::new(Arc::new(DieselUserRepository::new(
            pool.clone(),
        )))),
        None => Arc::new(FixtureUserSync),
    }
}

fn share_bookmarks<S>(service: Arc<S>) -> (Arc<dyn BookmarksCommand>, Arc<dyn BookmarksQuery>)
where
    S: BookmarksCommand + BookmarksQuery + 'static,
{
    (service.clone(), service)
}

fn build_bookmarks_pair(
    pool: Option<&DbPool>,
    tours: &Arc<KorServiceSource>,
) -> (Arc<dyn BookmarksCommand>, Arc<dyn BookmarksQuery>) {
    let fixtures: (Arc<dyn BookmarksCommand>, Arc<dyn BookmarksQuery>) =
        (Arc::new(FixtureBookmarks), Arc::new(FixtureBookmarks));
    build_service_pair(
        pool,
        |pool| {
            BookmarksService::new(
                Arc::new(DieselBookmarkRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::clone(tours),
            )
        },
        fixtures,
        share_bookmarks,
    )
}

/// Assemble the shared HTTP state from configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the tour API HTTP client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let tours = Arc::new(
        KorServiceSource::new(config.tour_api.clone())
            .map_err(|e| std::io::Error::other(format!("tour API client: {e}")))?,
    );
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let pool = config.db_pool.as_ref();
    if pool.is_none() {
        info!("no database configured; users and bookmarks use fixtures");
    }

    let (bookmarks, bookmarks_query) = build_bookmarks_pair(pool, &tours);
    let ports = HttpStatePorts {
        tours: Arc::new(TourCatalogueService::new(Arc::clone(&tours))),
        stats: Arc::new(StatsService::new(Arc::clone(&tours), Arc::clone(&clock))),
        users: build_user_sync(pool),
        bookmarks,
        bookmarks_query,
        sitemap: Arc::new(SeoService::new(tours, clock, config.site_url.clone())),
    };

    let mut state = HttpState::new(ports, config.site_url.clone()).with_map(config.map.clone());
    if let Some(verifier) = config.verifier.clone() {
        state = state.with_verifier(verifier);
    }
    Ok(web::Data::new(state))
}
