//! Attraction browsing service.
//!
//! Implements [`TourCatalogue`] over a [`TourSource`]: listing with keyword
//! search and content-type fan-out, detail pages with independently degrading
//! sections, and area filter options.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    PaginationMode, TourCatalogue, TourDetailView, TourListQuery, TourListRequest, TourListing,
    TourPage, TourSort, TourSource, TourSourceError, TourSummary,
};
use crate::domain::{AreaCode, ContentId, DetailMapView, Error, MapView, TourItem};

/// Number of page links shown around the current page.
pub const PAGE_WINDOW_SIZE: u64 = 5;

const TIMEOUT_MESSAGE: &str =
    "요청 시간이 초과되었습니다. 네트워크 연결을 확인하고 잠시 후 다시 시도해주세요.";
const UNAVAILABLE_MESSAGE: &str =
    "관광 정보 서비스에 연결할 수 없습니다. 잠시 후 다시 시도해주세요.";

/// Translate a provider failure into the domain error surfaced to clients.
pub(crate) fn map_tour_source_error(error: TourSourceError) -> Error {
    if error.is_no_data() {
        return Error::not_found(error.to_string());
    }
    match error {
        TourSourceError::Configuration { message } => {
            Error::internal(format!("tour api misconfigured: {message}"))
        }
        TourSourceError::Timeout { .. } => Error::service_unavailable(TIMEOUT_MESSAGE),
        TourSourceError::Transport { .. } => Error::service_unavailable(UNAVAILABLE_MESSAGE),
        TourSourceError::Http { status, .. } => Error::service_unavailable(UNAVAILABLE_MESSAGE)
            .with_details(json!({ "upstreamStatus": status })),
        TourSourceError::Provider { code, message } => {
            Error::service_unavailable(message).with_details(json!({ "providerCode": code }))
        }
        TourSourceError::Decode { message } => {
            Error::internal(format!("tour api response invalid: {message}"))
        }
        TourSourceError::NotFound { message } => Error::not_found(message),
        TourSourceError::InvalidRequest { message } => Error::invalid_request(message),
    }
}

/// Browsing service implementing [`TourCatalogue`].
#[derive(Clone)]
pub struct TourCatalogueService<S> {
    source: Arc<S>,
}

impl<S> TourCatalogueService<S> {
    /// Create a service reading from `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

impl<S> TourCatalogueService<S>
where
    S: TourSource,
{
    async fn fetch_page(
        &self,
        keyword: Option<&str>,
        request: &TourListRequest,
    ) -> Result<TourPage, TourSourceError> {
        match keyword {
            Some(keyword) => self.source.search_keyword(keyword, request).await,
            None => self.source.area_based_list(request).await,
        }
    }

    /// Provider calls for one listing page.
    ///
    /// A single call maps onto the provider's own paging. With several
    /// types, each type is read from its first row up to the end of the
    /// requested page so the merged order is the same on every page.
    fn provider_requests(query: &TourListQuery) -> Vec<TourListRequest> {
        let base = TourListRequest {
            area_code: query.area_code.clone(),
            sigungu_code: None,
            content_type: None,
            num_of_rows: query.page.page_size(),
            page_no: query.page.page(),
        };
        match query.content_types.as_slice() {
            [] => vec![base],
            [single] => vec![base.with_content_type(*single)],
            many => {
                let prefix = TourListRequest {
                    num_of_rows: query.page.page_size().saturating_mul(query.page.page()),
                    page_no: 1,
                    ..base
                };
                many.iter()
                    .map(|content_type| prefix.with_content_type(*content_type))
                    .collect()
            }
        }
    }
}

/// Cut the requested page out of a merged multi-type prefix.
pub(crate) fn slice_page(items: Vec<TourItem>, page: PageRequest) -> Vec<TourItem> {
    let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(page.page_size()).unwrap_or(usize::MAX);
    items.into_iter().skip(skip).take(take).collect()
}

/// Merge provider pages, keeping the first record for each content id and
/// summing the reported totals.
pub(crate) fn merge_pages(pages: Vec<TourPage>) -> TourPage {
    let mut seen = HashSet::new();
    let mut merged = TourPage::default();
    for page in pages {
        merged.total_count = merged.total_count.saturating_add(page.total_count);
        merged.items.extend(
            page.items
                .into_iter()
                .filter(|item| seen.insert(item.content_id.clone())),
        );
    }
    merged
}

/// Sort records in place.
///
/// `Latest` orders by modification time, newest first, with unparseable
/// timestamps last.
pub(crate) fn sort_items(items: &mut [TourItem], sort: TourSort) {
    match sort {
        TourSort::Name => items.sort_by(|a, b| a.title.cmp(&b.title)),
        TourSort::Latest => items.sort_by_key(|item| Reverse(item.modified_at())),
    }
}

fn normalised_keyword(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_owned)
}

#[async_trait]
impl<S> TourCatalogue for TourCatalogueService<S>
where
    S: TourSource,
{
    async fn list_tours(&self, query: &TourListQuery) -> Result<TourListing, Error> {
        let keyword = normalised_keyword(query.keyword.as_deref());
        let requests = Self::provider_requests(query);
        debug!(
            keyword = keyword.as_deref(),
            area_code = query.area_code.as_deref(),
            calls = requests.len(),
            "listing tours"
        );

        let pages = try_join_all(
            requests
                .iter()
                .map(|request| self.fetch_page(keyword.as_deref(), request)),
        )
        .await
        .map_err(map_tour_source_error)?;

        let TourPage {
            mut items,
            total_count,
        } = merge_pages(pages);
        sort_items(&mut items, query.sort);
        let items = if requests.len() > 1 {
            slice_page(items, query.page)
        } else {
            items
        };

        let map = MapView::from_items(&items);
        let page = Page::new(items, query.page, total_count).map(|item| TourSummary::from(&item));
        let page_window = match query.pagination {
            PaginationMode::Pages => page.window(PAGE_WINDOW_SIZE),
            PaginationMode::Infinite => Vec::new(),
        };

        Ok(TourListing {
            page,
            page_window,
            map,
            keyword,
            view: query.view,
            pagination: query.pagination,
        })
    }

    async fn tour_detail(&self, content_id: &str) -> Result<TourDetailView, Error> {
        let id = ContentId::new(content_id).map_err(|err| {
            Error::not_found(format!(
                "관광지 정보를 찾을 수 없습니다. (contentId: {content_id})"
            ))
            .with_details(json!({ "reason": err.to_string() }))
        })?;

        let detail = self
            .source
            .detail_common(&id)
            .await
            .map_err(map_tour_source_error)?;

        let content_type_id = detail.item.content_type_id.clone();
        let (intro, images, pet) = tokio::join!(
            self.source.detail_intro(&id, &content_type_id),
            self.source.detail_images(&id),
            self.source.detail_pet_tour(&id),
        );

        let intro = intro
            .inspect_err(|err| warn!(content_id = %id, error = %err, "intro section unavailable"))
            .ok();
        let images = images
            .inspect_err(|err| warn!(content_id = %id, error = %err, "gallery unavailable"))
            .unwrap_or_default();
        let pet = match pet {
            Ok(info) => info.map(|info| info.sanitised()).filter(|info| !info.is_empty()),
            Err(err) if err.is_no_data() => None,
            Err(err) => {
                warn!(content_id = %id, error = %err, "pet travel section unavailable");
                None
            }
        };
        let map = DetailMapView::from_item(&detail.item);

        Ok(TourDetailView {
            detail,
            intro,
            images,
            pet,
            map,
        })
    }

    async fn area_options(&self) -> Vec<AreaCode> {
        self.source.area_codes().await.unwrap_or_else(|err| {
            warn!(error = %err, "area codes unavailable; filters disabled");
            Vec::new()
        })
    }
}

#[cfg(test)]
#[path = "tour_catalogue_service_tests.rs"]
mod tests;
