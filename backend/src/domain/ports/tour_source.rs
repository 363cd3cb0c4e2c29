//! Driven port for reading tourism records from the KorService2 provider.
//!
//! The domain owns request and response shapes; the outbound adapter deals
//! with query strings, envelopes, retries and provider result codes.

use async_trait::async_trait;

use crate::domain::{
    AreaCode, ContentId, ContentType, PetTourInfo, TourDetail, TourImage, TourIntro, TourItem,
};

use super::define_port_error;

/// Rows requested when the caller does not specify a page size.
pub const DEFAULT_LIST_ROWS: u32 = 10;

/// Listing filters shared by `areaBasedList2` and `searchKeyword2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourListRequest {
    /// Provider area code.
    pub area_code: Option<String>,
    /// Provider district code, only meaningful with an area code.
    pub sigungu_code: Option<String>,
    /// Restrict results to one content type.
    pub content_type: Option<ContentType>,
    /// Rows per provider page.
    pub num_of_rows: u32,
    /// One-based provider page number.
    pub page_no: u32,
}

impl Default for TourListRequest {
    fn default() -> Self {
        Self {
            area_code: None,
            sigungu_code: None,
            content_type: None,
            num_of_rows: DEFAULT_LIST_ROWS,
            page_no: 1,
        }
    }
}

impl TourListRequest {
    /// Copy of this request scoped to one content type.
    pub fn with_content_type(&self, content_type: ContentType) -> Self {
        Self {
            content_type: Some(content_type),
            ..self.clone()
        }
    }
}

/// One provider page of tour records together with the provider's total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TourPage {
    /// Records on this page.
    pub items: Vec<TourItem>,
    /// Total matching records across all pages.
    pub total_count: u64,
}

define_port_error! {
    /// Errors surfaced while calling the tourism provider.
    pub enum TourSourceError {
        /// The adapter is missing its service key or base URL.
        Configuration { message: String } =>
            "tour api configuration error: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "tour api timeout: {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "tour api transport failed: {message}",
        /// The provider answered with a non-success HTTP status.
        Http { status: u16, message: String } =>
            "tour api http {status}: {message}",
        /// The provider envelope carried a non-success result code.
        Provider { code: String, message: String } =>
            "{message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "tour api response decode failed: {message}",
        /// The requested record does not exist.
        NotFound { message: String } =>
            "{message}",
        /// The adapter rejected the request before sending it.
        InvalidRequest { message: String } =>
            "tour api request invalid: {message}",
    }
}

impl TourSourceError {
    /// Return whether retrying this error is expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }

    /// Whether the provider reported that it simply has no data.
    pub fn is_no_data(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Provider { code, .. } => matches!(code.as_str(), "0005" | "ERROR-336"),
            _ => false,
        }
    }
}

/// Port for querying the tourism provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TourSource: Send + Sync {
    /// Area code table (`areaCode2`).
    async fn area_codes(&self) -> Result<Vec<AreaCode>, TourSourceError>;

    /// Area-based listing (`areaBasedList2`).
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use mytrip::domain::ports::{FixtureTourSource, TourListRequest, TourSource};
    ///
    /// let page = FixtureTourSource
    ///     .area_based_list(&TourListRequest::default())
    ///     .await?;
    /// assert!(page.items.is_empty());
    /// # Ok::<(), mytrip::domain::ports::TourSourceError>(())
    /// ```
    async fn area_based_list(&self, request: &TourListRequest)
    -> Result<TourPage, TourSourceError>;

    /// Keyword search (`searchKeyword2`).
    async fn search_keyword(
        &self,
        keyword: &str,
        request: &TourListRequest,
    ) -> Result<TourPage, TourSourceError>;

    /// Common detail record; [`TourSourceError::NotFound`] when absent.
    async fn detail_common(&self, content_id: &ContentId) -> Result<TourDetail, TourSourceError>;

    /// Type-specific operating information; [`TourSourceError::NotFound`]
    /// when absent.
    async fn detail_intro(
        &self,
        content_id: &ContentId,
        content_type_id: &str,
    ) -> Result<TourIntro, TourSourceError>;

    /// Gallery images.
    async fn detail_images(&self, content_id: &ContentId)
    -> Result<Vec<TourImage>, TourSourceError>;

    /// Pet travel information; `None` when the provider has none.
    async fn detail_pet_tour(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<PetTourInfo>, TourSourceError>;
}

/// Fixture implementation returning empty provider data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTourSource;

#[async_trait]
impl TourSource for FixtureTourSource {
    async fn area_codes(&self) -> Result<Vec<AreaCode>, TourSourceError> {
        Ok(Vec::new())
    }

    async fn area_based_list(
        &self,
        _request: &TourListRequest,
    ) -> Result<TourPage, TourSourceError> {
        Ok(TourPage::default())
    }

    async fn search_keyword(
        &self,
        _keyword: &str,
        _request: &TourListRequest,
    ) -> Result<TourPage, TourSourceError> {
        Ok(TourPage::default())
    }

    async fn detail_common(&self, content_id: &ContentId) -> Result<TourDetail, TourSourceError> {
        Err(TourSourceError::not_found(format!(
            "관광지 정보를 찾을 수 없습니다. (contentId: {content_id})"
        )))
    }

    async fn detail_intro(
        &self,
        content_id: &ContentId,
        _content_type_id: &str,
    ) -> Result<TourIntro, TourSourceError> {
        Err(TourSourceError::not_found(format!(
            "운영 정보를 찾을 수 없습니다. (contentId: {content_id})"
        )))
    }

    async fn detail_images(
        &self,
        _content_id: &ContentId,
    ) -> Result<Vec<TourImage>, TourSourceError> {
        Ok(Vec::new())
    }

    async fn detail_pet_tour(
        &self,
        _content_id: &ContentId,
    ) -> Result<Option<PetTourInfo>, TourSourceError> {
        Ok(None)
    }
}
