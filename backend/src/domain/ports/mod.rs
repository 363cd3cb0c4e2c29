//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod bookmark_repository;
mod bookmarks;
mod sitemap_query;
mod stats_query;
mod tour_catalogue;
mod tour_source;
mod user_repository;
mod user_sync;

#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
pub use bookmark_repository::{
    BookmarkRepository, BookmarkRepositoryError, FixtureBookmarkRepository,
};
#[cfg(test)]
pub use bookmarks::{MockBookmarksCommand, MockBookmarksQuery};
pub use bookmarks::{
    BookmarkedTour, BookmarksCommand, BookmarksQuery, BulkRemoveOutcome, FixtureBookmarks,
};
#[cfg(test)]
pub use sitemap_query::MockSitemapQuery;
pub use sitemap_query::{FixtureSitemapQuery, SitemapQuery};
#[cfg(test)]
pub use stats_query::MockStatsQuery;
pub use stats_query::{FixtureStatsQuery, RegionStat, StatsQuery, StatsSummary, TypeStat};
#[cfg(test)]
pub use tour_catalogue::MockTourCatalogue;
pub use tour_catalogue::{
    FixtureTourCatalogue, ListView, PaginationMode, TourCatalogue, TourDetailView, TourListQuery,
    TourListing, TourSort, TourSummary,
};
#[cfg(test)]
pub use tour_source::MockTourSource;
pub use tour_source::{
    DEFAULT_LIST_ROWS, FixtureTourSource, TourListRequest, TourPage, TourSource, TourSourceError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_sync::MockUserSync;
pub use user_sync::{FixtureUserSync, UserSync};
