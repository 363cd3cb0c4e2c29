//! Driving port for search-engine documents.

use async_trait::async_trait;
use chrono::Utc;
use url::Url;

use crate::domain::sitemap::{SitemapEntry, static_entries};

/// Domain use-case port for sitemap generation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SitemapQuery: Send + Sync {
    /// Static pages followed by attraction detail pages.
    async fn sitemap_entries(&self) -> Vec<SitemapEntry>;
}

/// Fixture sitemap listing only the static pages.
#[derive(Debug, Clone)]
pub struct FixtureSitemapQuery {
    site: Url,
}

impl FixtureSitemapQuery {
    /// Fixture rooted at `site`.
    pub fn new(site: Url) -> Self {
        Self { site }
    }
}

#[async_trait]
impl SitemapQuery for FixtureSitemapQuery {
    async fn sitemap_entries(&self) -> Vec<SitemapEntry> {
        static_entries(&self.site, Utc::now().date_naive())
    }
}
