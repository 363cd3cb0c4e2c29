//! Driving port for the attraction list, detail and filter views.
//!
//! Inbound adapters call this port with parsed query parameters and receive
//! ready-to-render view models; provider access stays behind
//! [`super::TourSource`].

use async_trait::async_trait;
use pagination::{Page, PageRequest, PageSlot};
use serde::Serialize;

use crate::domain::coordinates::Coordinates;
use crate::domain::{
    AreaCode, ContentType, DetailMapView, Error, MapView, PetTourInfo, TourDetail, TourImage,
    TourIntro, TourItem,
};

/// Ordering applied to the attraction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourSort {
    /// Most recently modified first.
    #[default]
    Latest,
    /// Title ascending.
    Name,
}

impl TourSort {
    /// Parse a query value, falling back to [`TourSort::Latest`].
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("name") => Self::Name,
            _ => Self::Latest,
        }
    }
}

/// How the list page lays out results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListView {
    /// Cards only.
    #[default]
    List,
    /// Map with markers.
    Map,
}

/// How the list page navigates between result pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Numbered page links.
    #[default]
    Pages,
    /// Load-more scrolling.
    Infinite,
}

/// Parsed list page query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourListQuery {
    /// Free-text keyword; switches to keyword search when present.
    pub keyword: Option<String>,
    /// Provider area code filter.
    pub area_code: Option<String>,
    /// Content type filters; several types fan out to parallel calls.
    pub content_types: Vec<ContentType>,
    /// Result ordering.
    pub sort: TourSort,
    /// Requested page.
    pub page: PageRequest,
    /// Layout hint echoed back to the client.
    pub view: ListView,
    /// Navigation hint echoed back to the client.
    pub pagination: PaginationMode,
}

/// Card-level view of one attraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSummary {
    /// Provider content identifier.
    pub content_id: String,
    /// Provider content type code.
    pub content_type_id: String,
    /// Content type label.
    pub content_type: Option<&'static str>,
    /// Attraction name.
    pub title: String,
    /// Full address.
    pub address: Option<String>,
    /// Provider area code.
    pub area_code: Option<String>,
    /// Region name for the area code.
    pub region: Option<&'static str>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
    /// Contact number.
    pub tel: Option<String>,
    /// Converted coordinates, when valid.
    pub coordinates: Option<Coordinates>,
    /// Provider modification timestamp.
    pub modified_time: Option<String>,
}

impl From<&TourItem> for TourSummary {
    fn from(item: &TourItem) -> Self {
        Self {
            content_id: item.content_id.clone(),
            content_type_id: item.content_type_id.clone(),
            content_type: item.content_type().map(ContentType::label),
            title: item.title.clone(),
            address: item.address(),
            area_code: item.area_code.clone(),
            region: item.region_name(),
            thumbnail: item.thumbnail().map(str::to_owned),
            tel: item.tel.clone(),
            coordinates: item.coordinates().ok(),
            modified_time: item.modified_time.clone(),
        }
    }
}

/// List page view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourListing {
    /// Paged attraction cards.
    pub page: Page<TourSummary>,
    /// Page-number window; empty for infinite scrolling.
    pub page_window: Vec<PageSlot>,
    /// Map markers and viewport.
    pub map: MapView,
    /// Keyword the results were searched with.
    pub keyword: Option<String>,
    /// Layout hint.
    pub view: ListView,
    /// Navigation hint.
    pub pagination: PaginationMode,
}

/// Detail page view model.
#[derive(Debug, Clone, PartialEq)]
pub struct TourDetailView {
    /// Common detail record.
    pub detail: TourDetail,
    /// Operating information, when published.
    pub intro: Option<TourIntro>,
    /// Gallery images.
    pub images: Vec<TourImage>,
    /// Pet travel information, when published.
    pub pet: Option<PetTourInfo>,
    /// Single-attraction map, when the record has coordinates.
    pub map: Option<DetailMapView>,
}

/// Domain use-case port for attraction browsing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourCatalogue: Send + Sync {
    /// Build the list page for `query`.
    async fn list_tours(&self, query: &TourListQuery) -> Result<TourListing, Error>;

    /// Build the detail page for a raw content id.
    ///
    /// Identifiers that are not all digits are reported as not found.
    async fn tour_detail(&self, content_id: &str) -> Result<TourDetailView, Error>;

    /// Area filter options; empty when the provider is unavailable.
    async fn area_options(&self) -> Vec<AreaCode>;
}

/// Fixture catalogue with no attractions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTourCatalogue;

#[async_trait]
impl TourCatalogue for FixtureTourCatalogue {
    async fn list_tours(&self, query: &TourListQuery) -> Result<TourListing, Error> {
        let page = Page::new(Vec::new(), query.page, 0);
        Ok(TourListing {
            page_window: page.window(crate::domain::PAGE_WINDOW_SIZE),
            page,
            map: MapView::from_items(&[]),
            keyword: query.keyword.clone(),
            view: query.view,
            pagination: query.pagination,
        })
    }

    async fn tour_detail(&self, content_id: &str) -> Result<TourDetailView, Error> {
        Err(Error::not_found(format!(
            "관광지 정보를 찾을 수 없습니다. (contentId: {content_id})"
        )))
    }

    async fn area_options(&self) -> Vec<AreaCode> {
        Vec::new()
    }
}
