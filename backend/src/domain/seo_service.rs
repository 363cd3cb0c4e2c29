//! Sitemap assembly from provider listings.
//!
//! Detail pages are collected for the main areas only; a failing
//! area/type combination is skipped rather than failing the document.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use mockable::Clock;
use tracing::{info, warn};
use url::Url;

use crate::domain::ports::{SitemapQuery, TourListRequest, TourSource};
use crate::domain::sitemap::{
    ChangeFrequency, SitemapEntry, last_modified_date, place_url, static_entries,
};
use crate::domain::ContentType;

/// Area codes whose attractions are listed in the sitemap.
pub const SITEMAP_AREAS: [&str; 3] = ["1", "6", "39"];

/// Rows requested per area/type combination.
pub const SITEMAP_ROWS: u32 = 100;

const DETAIL_PRIORITY: f32 = 0.7;

/// Service implementing [`SitemapQuery`].
#[derive(Clone)]
pub struct SeoService<S> {
    source: Arc<S>,
    clock: Arc<dyn Clock>,
    site: Url,
}

impl<S> SeoService<S> {
    /// Create a service publishing URLs under `site`.
    pub fn new(source: Arc<S>, clock: Arc<dyn Clock>, site: Url) -> Self {
        Self {
            source,
            clock,
            site,
        }
    }
}

#[async_trait]
impl<S> SitemapQuery for SeoService<S>
where
    S: TourSource,
{
    async fn sitemap_entries(&self) -> Vec<SitemapEntry> {
        let now = self.clock.utc();
        let mut entries = static_entries(&self.site, now.date_naive());

        let combinations = SITEMAP_AREAS.iter().flat_map(|area| {
            ContentType::ALL
                .into_iter()
                .map(move |content_type| (*area, content_type))
        });
        let results = join_all(combinations.map(|(area, content_type)| async move {
            let request = TourListRequest {
                area_code: Some(area.to_owned()),
                content_type: Some(content_type),
                num_of_rows: SITEMAP_ROWS,
                page_no: 1,
                ..TourListRequest::default()
            };
            (area, content_type, self.source.area_based_list(&request).await)
        }))
        .await;

        let mut seen = HashSet::new();
        for (area, content_type, result) in results {
            let page = match result {
                Ok(page) => page,
                Err(err) => {
                    warn!(area_code = area, content_type_id = content_type.code(), error = %err, "skipping sitemap combination");
                    continue;
                }
            };
            for item in page.items {
                if !seen.insert(item.content_id.clone()) {
                    continue;
                }
                let Some(loc) = place_url(&self.site, &item.content_id) else {
                    continue;
                };
                entries.push(SitemapEntry {
                    loc,
                    last_modified: last_modified_date(item.modified_time.as_deref(), now),
                    change_frequency: ChangeFrequency::Monthly,
                    priority: DETAIL_PRIORITY,
                });
            }
        }
        info!(urls = entries.len(), "sitemap assembled");
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockTourSource, TourPage, TourSourceError};
    use crate::domain::TourItem;
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use rstest::rstest;

    fn item(id: &str, modified: Option<&str>) -> TourItem {
        TourItem {
            content_id: id.to_owned(),
            content_type_id: "12".to_owned(),
            title: format!("place {id}"),
            modified_time: modified.map(str::to_owned),
            ..TourItem::default()
        }
    }

    fn service(source: MockTourSource) -> SeoService<MockTourSource> {
        let now = Utc
            .with_ymd_and_hms(2025, 5, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now);
        SeoService::new(
            Arc::new(source),
            Arc::new(clock),
            Url::parse("https://mytrip.example.com/").expect("valid url"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn sitemap_dedupes_and_skips_failures() {
        let mut source = MockTourSource::new();
        source
            .expect_area_based_list()
            .times(SITEMAP_AREAS.len() * ContentType::ALL.len())
            .returning(|request| {
                assert_eq!(request.num_of_rows, SITEMAP_ROWS);
                match (request.area_code.as_deref(), request.content_type) {
                    (Some("1"), Some(ContentType::TouristSpot)) => Ok(TourPage {
                        items: vec![item("100", Some("20250114093015")), item("200", None)],
                        total_count: 2,
                    }),
                    (Some("6"), Some(ContentType::TouristSpot)) => Ok(TourPage {
                        items: vec![item("100", Some("20240101000000"))],
                        total_count: 1,
                    }),
                    (Some("39"), _) => Err(TourSourceError::timeout("slow")),
                    _ => Ok(TourPage::default()),
                }
            });

        let entries = service(source).sitemap_entries().await;
        let detail: Vec<_> = entries
            .iter()
            .filter(|entry| entry.change_frequency == ChangeFrequency::Monthly)
            .map(|entry| (entry.loc.path().to_owned(), entry.last_modified.to_string()))
            .collect();

        assert_eq!(entries.len(), 5);
        assert_eq!(
            detail,
            vec![
                ("/places/100".to_owned(), "2025-01-14".to_owned()),
                ("/places/200".to_owned(), "2025-05-01".to_owned()),
            ]
        );
    }
}
