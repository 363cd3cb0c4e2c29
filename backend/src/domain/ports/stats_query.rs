//! Driving port for the statistics dashboard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ContentType, Error};

/// Attraction count for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStat {
    /// Provider area code.
    pub area_code: &'static str,
    /// Region name.
    pub area_name: &'static str,
    /// Attractions reported by the provider.
    pub count: u64,
}

/// Attraction count for one content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStat {
    /// Provider content type code.
    pub content_type_id: &'static str,
    /// Content type label.
    pub type_name: &'static str,
    /// Attractions reported by the provider.
    pub count: u64,
    /// Share of the surviving type total, in percent.
    pub percentage: f64,
}

impl TypeStat {
    /// Stat for `content_type` without a percentage yet.
    pub fn new(content_type: ContentType, count: u64) -> Self {
        Self {
            content_type_id: content_type.code(),
            type_name: content_type.label(),
            count,
            percentage: 0.0,
        }
    }
}

/// Dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Sum of all type counts.
    pub total_count: u64,
    /// Three largest regions.
    pub top_regions: Vec<RegionStat>,
    /// Three largest content types.
    pub top_types: Vec<TypeStat>,
    /// When the summary was assembled.
    pub last_updated: DateTime<Utc>,
}

/// Domain use-case port for statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsQuery: Send + Sync {
    /// Per-region counts; regions whose lookup failed are omitted.
    async fn region_stats(&self) -> Vec<RegionStat>;

    /// Per-type counts with percentages; failed types are omitted.
    async fn type_stats(&self) -> Vec<TypeStat>;

    /// Totals and top-three rankings.
    async fn summary(&self) -> Result<StatsSummary, Error>;
}

/// Fixture statistics with no data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStatsQuery;

#[async_trait]
impl StatsQuery for FixtureStatsQuery {
    async fn region_stats(&self) -> Vec<RegionStat> {
        Vec::new()
    }

    async fn type_stats(&self) -> Vec<TypeStat> {
        Vec::new()
    }

    async fn summary(&self) -> Result<StatsSummary, Error> {
        Ok(StatsSummary {
            total_count: 0,
            top_regions: Vec::new(),
            top_types: Vec::new(),
            last_updated: Utc::now(),
        })
    }
}
