//! Statistics aggregation over provider counts.
//!
//! Every region and content type is queried in parallel with
//! `numOfRows=1`, reading only the provider's `totalCount`. A failing branch
//! is logged and dropped so one bad region never blanks the dashboard.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    RegionStat, StatsQuery, StatsSummary, TourListRequest, TourSource, TypeStat,
};
use crate::domain::{ContentType, Error, REGIONS, Region};

/// Entries kept in each top ranking.
pub const TOP_N: usize = 3;

/// Statistics service implementing [`StatsQuery`].
#[derive(Clone)]
pub struct StatsService<S> {
    source: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> StatsService<S> {
    /// Create a service reading counts from `source`.
    pub fn new(source: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }
}

fn count_request(region: Option<&Region>, content_type: Option<ContentType>) -> TourListRequest {
    TourListRequest {
        area_code: region.map(|region| region.code.to_owned()),
        content_type,
        num_of_rows: 1,
        page_no: 1,
        ..TourListRequest::default()
    }
}

/// Fill in each type's share of the total.
pub(crate) fn with_percentages(mut stats: Vec<TypeStat>) -> Vec<TypeStat> {
    let total: u64 = stats.iter().map(|stat| stat.count).sum();
    for stat in &mut stats {
        stat.percentage = if total == 0 {
            0.0
        } else {
            stat.count as f64 / total as f64 * 100.0
        };
    }
    stats
}

fn top_by_count<T: Clone>(items: &[T], count: impl Fn(&T) -> u64) -> Vec<T> {
    let mut ranked = items.to_vec();
    ranked.sort_by_key(|item| Reverse(count(item)));
    ranked.truncate(TOP_N);
    ranked
}

#[async_trait]
impl<S> StatsQuery for StatsService<S>
where
    S: TourSource,
{
    async fn region_stats(&self) -> Vec<RegionStat> {
        let results = join_all(REGIONS.iter().map(|region| async move {
            let request = count_request(Some(region), None);
            (region, self.source.area_based_list(&request).await)
        }))
        .await;

        let stats: Vec<RegionStat> = results
            .into_iter()
            .filter_map(|(region, result)| match result {
                Ok(page) => Some(RegionStat {
                    area_code: region.code,
                    area_name: region.name,
                    count: page.total_count,
                }),
                Err(err) => {
                    warn!(area_code = region.code, area_name = region.name, error = %err, "region count failed");
                    None
                }
            })
            .collect();
        info!(
            succeeded = stats.len(),
            requested = REGIONS.len(),
            "region stats collected"
        );
        stats
    }

    async fn type_stats(&self) -> Vec<TypeStat> {
        let results = join_all(ContentType::ALL.into_iter().map(|content_type| async move {
            let request = count_request(None, Some(content_type));
            (content_type, self.source.area_based_list(&request).await)
        }))
        .await;

        let stats: Vec<TypeStat> = results
            .into_iter()
            .filter_map(|(content_type, result)| match result {
                Ok(page) => Some(TypeStat::new(content_type, page.total_count)),
                Err(err) => {
                    warn!(content_type_id = content_type.code(), error = %err, "type count failed");
                    None
                }
            })
            .collect();
        info!(
            succeeded = stats.len(),
            requested = ContentType::ALL.len(),
            "type stats collected"
        );
        with_percentages(stats)
    }

    async fn summary(&self) -> Result<StatsSummary, Error> {
        let (regions, types) = tokio::join!(self.region_stats(), self.type_stats());
        let total_count = types.iter().map(|stat| stat.count).sum();

        Ok(StatsSummary {
            total_count,
            top_regions: top_by_count(&regions, |stat| stat.count),
            top_types: top_by_count(&types, |stat| stat.count),
            last_updated: self.clock.utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Aggregation coverage with scripted provider counts.

    use std::collections::HashMap;

    use chrono::{DateTime, TimeZone, Utc};
    use mockable::MockClock;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockTourSource, TourPage, TourSourceError};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn service(source: MockTourSource) -> StatsService<MockTourSource> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(fixed_time());
        StatsService::new(Arc::new(source), Arc::new(clock))
    }

    fn counting_source(
        region_counts: HashMap<&'static str, Result<u64, TourSourceError>>,
        type_counts: HashMap<&'static str, u64>,
    ) -> MockTourSource {
        let mut source = MockTourSource::new();
        source.expect_area_based_list().returning(move |request| {
            assert_eq!(request.num_of_rows, 1);
            if let Some(code) = request.area_code.as_deref() {
                return match region_counts.get(code) {
                    Some(Ok(count)) => Ok(TourPage {
                        items: Vec::new(),
                        total_count: *count,
                    }),
                    Some(Err(err)) => Err(err.clone()),
                    None => Ok(TourPage::default()),
                };
            }
            let code = request.content_type.map(ContentType::code).unwrap_or_default();
            Ok(TourPage {
                items: Vec::new(),
                total_count: type_counts.get(code).copied().unwrap_or_default(),
            })
        });
        source
    }

    #[rstest]
    #[tokio::test]
    async fn failed_region_is_dropped() {
        let regions = HashMap::from([
            ("1", Ok(500)),
            ("6", Err(TourSourceError::timeout("slow"))),
            ("39", Ok(300)),
        ]);
        let stats = service(counting_source(regions, HashMap::new()))
            .region_stats()
            .await;

        assert_eq!(stats.len(), REGIONS.len() - 1);
        assert!(stats.iter().all(|stat| stat.area_code != "6"));
        let seoul = stats.iter().find(|stat| stat.area_code == "1").expect("seoul");
        assert_eq!((seoul.area_name, seoul.count), ("서울", 500));
    }

    #[rstest]
    #[tokio::test]
    async fn type_percentages_share_surviving_total() {
        let types = HashMap::from([("12", 300), ("39", 100)]);
        let stats = service(counting_source(HashMap::new(), types))
            .type_stats()
            .await;

        let spot = stats
            .iter()
            .find(|stat| stat.content_type_id == "12")
            .expect("tourist spots");
        assert!((spot.percentage - 75.0).abs() < 1e-9);
        let festival = stats
            .iter()
            .find(|stat| stat.content_type_id == "15")
            .expect("festivals");
        assert_eq!(festival.percentage, 0.0);
    }

    #[rstest]
    fn zero_total_yields_zero_percentages() {
        let stats = with_percentages(vec![TypeStat::new(ContentType::Shopping, 0)]);
        assert_eq!(stats[0].percentage, 0.0);
    }

    #[rstest]
    #[tokio::test]
    async fn summary_ranks_top_three_and_sums_types() {
        let regions = HashMap::from([
            ("1", Ok(500)),
            ("31", Ok(450)),
            ("32", Ok(400)),
            ("39", Ok(350)),
            ("2", Err(TourSourceError::transport("reset"))),
        ]);
        let types = HashMap::from([("12", 300), ("39", 200), ("32", 150), ("38", 50)]);
        let summary = service(counting_source(regions, types))
            .summary()
            .await
            .expect("summary");

        assert_eq!(summary.total_count, 700);
        let top_regions: Vec<_> = summary.top_regions.iter().map(|r| r.area_name).collect();
        assert_eq!(top_regions, ["서울", "경기", "강원"]);
        let top_types: Vec<_> = summary.top_types.iter().map(|t| t.type_name).collect();
        assert_eq!(top_types, ["관광지", "음식점", "숙박"]);
        assert_eq!(summary.last_updated, fixed_time());
    }
}
