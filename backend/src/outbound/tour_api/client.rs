//! KorService2 adapter implementing the [`TourSource`] port.
//!
//! Owns query construction, the service credential, retries and envelope
//! normalisation. Only timeout and transport failures are retried; provider
//! result codes, HTTP statuses and decode failures surface after one attempt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use super::dto::{Listing, RowDto, decode_listing};
use super::retry::{RetryPolicy, RetrySleeper, TokioSleeper};
use super::transport::{DEFAULT_TIMEOUT, ReqwestTransport, TourApiTransport};
use crate::domain::ports::{TourListRequest, TourPage, TourSource, TourSourceError};
use crate::domain::{AreaCode, ContentId, PetTourInfo, TourDetail, TourImage, TourIntro};

/// Production base URL.
pub const DEFAULT_BASE_URL: &str = "https://apis.data.go.kr/B551011/KorService2";

/// Value of the `MobileApp` parameter.
pub const MOBILE_APP: &str = "MyTrip";

/// Rows requested from `areaCode2`.
pub const AREA_CODE_ROWS: u32 = 100;

const MISSING_KEY_MESSAGE: &str =
    "API 키가 설정되지 않았습니다. MYTRIP_TOUR_API_KEY를 설정해주세요.";

/// Connection settings for [`KorServiceSource`].
#[derive(Debug, Clone)]
pub struct KorServiceConfig {
    /// Endpoint root, without a trailing operation name.
    pub base_url: Url,
    /// Decoded service key; `None` fails every call with a configuration
    /// error.
    pub service_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Backoff for transient failures.
    pub retry: RetryPolicy,
}

impl KorServiceConfig {
    /// Settings with the default timeout and retry policy.
    pub fn new(base_url: Url, service_key: Option<String>) -> Self {
        Self {
            base_url,
            service_key,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Tour source backed by the KorService2 REST API.
pub struct KorServiceSource<T = ReqwestTransport> {
    transport: T,
    sleeper: Arc<dyn RetrySleeper>,
    base_url: Url,
    service_key: Option<String>,
    retry: RetryPolicy,
}

impl KorServiceSource<ReqwestTransport> {
    /// Build a source using a reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: KorServiceConfig) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport, Arc::new(TokioSleeper)))
    }
}

impl<T> KorServiceSource<T>
where
    T: TourApiTransport,
{
    /// Build a source over an explicit transport and sleeper.
    pub fn with_transport(
        config: KorServiceConfig,
        transport: T,
        sleeper: Arc<dyn RetrySleeper>,
    ) -> Self {
        Self {
            transport,
            sleeper,
            base_url: config.base_url,
            service_key: config
                .service_key
                .map(|key| key.trim().to_owned())
                .filter(|key| !key.is_empty()),
            retry: config.retry,
        }
    }

    fn build_url(
        &self,
        operation: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Url, TourSourceError> {
        let Some(service_key) = self.service_key.as_deref() else {
            return Err(TourSourceError::configuration(MISSING_KEY_MESSAGE));
        };
        let root = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{root}/{operation}")).map_err(|error| {
            TourSourceError::configuration(format!("invalid base URL: {error}"))
        })?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("serviceKey", service_key)
                .append_pair("MobileOS", "ETC")
                .append_pair("MobileApp", MOBILE_APP)
                .append_pair("_type", "json");
            for (name, value) in params {
                if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
                    query.append_pair(name, value);
                }
            }
        }
        Ok(url)
    }

    /// Call `operation`, retrying transient failures with backoff.
    async fn call(
        &self,
        operation: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Listing, TourSourceError> {
        let url = self.build_url(operation, params)?;
        let attempts = self.retry.attempts();

        let mut attempt = 1;
        loop {
            debug!(operation, attempt, "calling tour api");
            let result = match self.transport.get(&url).await {
                Ok(body) => decode_listing(&body),
                Err(error) => Err(error),
            };
            match result {
                Ok(listing) => return Ok(listing),
                Err(error) if error.is_retryable() && attempt < attempts => {
                    let delay = self.retry.delay_after(attempt);
                    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                    warn!(operation, attempt, delay_ms, error = %error, "retrying tour api call");
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    warn!(operation, attempt, error = %error, "tour api call failed");
                    return Err(error);
                }
            }
        }
    }

    async fn call_list(
        &self,
        operation: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<TourPage, TourSourceError> {
        let listing = self.call(operation, params).await?;
        Ok(TourPage {
            items: listing
                .rows
                .into_iter()
                .map(RowDto::into_tour_item)
                .collect(),
            total_count: listing.total_count,
        })
    }

    async fn first_row(
        &self,
        operation: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Option<RowDto>, TourSourceError> {
        let listing = self.call(operation, params).await?;
        Ok(listing.rows.into_iter().next())
    }
}

fn list_params(request: &TourListRequest) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("areaCode", request.area_code.clone()),
        ("sigunguCode", request.sigungu_code.clone()),
        (
            "contentTypeId",
            request
                .content_type
                .map(|content_type| content_type.code().to_owned()),
        ),
        ("numOfRows", Some(request.num_of_rows.max(1).to_string())),
        ("pageNo", Some(request.page_no.max(1).to_string())),
    ]
}

fn yes(name: &'static str) -> (&'static str, Option<String>) {
    (name, Some("Y".to_owned()))
}

#[async_trait]
impl<T> TourSource for KorServiceSource<T>
where
    T: TourApiTransport,
{
    async fn area_codes(&self) -> Result<Vec<AreaCode>, TourSourceError> {
        let listing = self
            .call(
                "areaCode2",
                &[
                    ("numOfRows", Some(AREA_CODE_ROWS.to_string())),
                    ("pageNo", Some("1".to_owned())),
                ],
            )
            .await?;
        Ok(listing
            .rows
            .into_iter()
            .map(RowDto::into_area_code)
            .collect())
    }

    async fn area_based_list(
        &self,
        request: &TourListRequest,
    ) -> Result<TourPage, TourSourceError> {
        self.call_list("areaBasedList2", &list_params(request)).await
    }

    async fn search_keyword(
        &self,
        keyword: &str,
        request: &TourListRequest,
    ) -> Result<TourPage, TourSourceError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(TourSourceError::invalid_request("keyword must not be blank"));
        }
        let mut params = list_params(request);
        params.insert(0, ("keyword", Some(keyword.to_owned())));
        self.call_list("searchKeyword2", &params).await
    }

    async fn detail_common(&self, content_id: &ContentId) -> Result<TourDetail, TourSourceError> {
        let params = [
            ("contentId", Some(content_id.to_string())),
            yes("defaultYN"),
            yes("firstImageYN"),
            yes("addrinfoYN"),
            yes("mapinfoYN"),
            yes("overviewYN"),
        ];
        self.first_row("detailCommon2", &params)
            .await?
            .map(RowDto::into_tour_detail)
            .ok_or_else(|| {
                TourSourceError::not_found(format!(
                    "관광지 정보를 찾을 수 없습니다. (contentId: {content_id})"
                ))
            })
    }

    async fn detail_intro(
        &self,
        content_id: &ContentId,
        content_type_id: &str,
    ) -> Result<TourIntro, TourSourceError> {
        let params = [
            ("contentId", Some(content_id.to_string())),
            ("contentTypeId", Some(content_type_id.trim().to_owned())),
        ];
        self.first_row("detailIntro2", &params)
            .await?
            .map(RowDto::into_tour_intro)
            .ok_or_else(|| {
                TourSourceError::not_found(format!(
                    "운영 정보를 찾을 수 없습니다. (contentId: {content_id})"
                ))
            })
    }

    async fn detail_images(
        &self,
        content_id: &ContentId,
    ) -> Result<Vec<TourImage>, TourSourceError> {
        let params = [
            ("contentId", Some(content_id.to_string())),
            yes("imageYN"),
            yes("subImageYN"),
        ];
        let listing = self.call("detailImage2", &params).await?;
        Ok(listing
            .rows
            .into_iter()
            .map(RowDto::into_tour_image)
            .filter(|image| !image.origin_url.is_empty())
            .collect())
    }

    async fn detail_pet_tour(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<PetTourInfo>, TourSourceError> {
        let params = [("contentId", Some(content_id.to_string()))];
        match self.first_row("detailPetTour2", &params).await {
            Ok(row) => Ok(row.map(RowDto::into_pet_tour_info)),
            Err(error) if error.is_no_data() => Ok(None),
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
