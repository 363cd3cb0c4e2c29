//! HTTP transport for KorService2 calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::TourSourceError;

/// Per-request timeout applied to provider calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Message shown when a provider call times out.
pub const TIMEOUT_MESSAGE: &str =
    "요청 시간이 초과되었습니다. 네트워크 연결을 확인하고 잠시 후 다시 시도해주세요.";

/// Single GET round trip returning the raw body of a 2xx response.
#[async_trait]
pub trait TourApiTransport: Send + Sync {
    /// Issue one GET request.
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TourSourceError>;
}

/// Reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests abort after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TourApiTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TourSourceError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(body.to_vec())
    }
}

fn map_transport_error(error: reqwest::Error) -> TourSourceError {
    if error.is_timeout() {
        TourSourceError::timeout(TIMEOUT_MESSAGE)
    } else {
        // Strip the query string so the service key never reaches the logs.
        TourSourceError::transport(error.without_url().to_string())
    }
}

fn map_status_error(status: StatusCode) -> TourSourceError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            TourSourceError::timeout(TIMEOUT_MESSAGE)
        }
        _ => TourSourceError::http(
            status.as_u16(),
            format!(
                "API 요청 실패: {}",
                status.canonical_reason().unwrap_or("unknown status")
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    fn timeout_statuses_are_retryable(#[case] status: StatusCode) {
        let error = map_status_error(status);
        assert!(matches!(error, TourSourceError::Timeout { .. }));
        assert!(error.is_retryable());
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR)]
    fn other_statuses_carry_the_status(#[case] status: StatusCode) {
        let error = map_status_error(status);
        assert_eq!(
            error,
            TourSourceError::http(
                status.as_u16(),
                format!("API 요청 실패: {}", status.canonical_reason().unwrap_or_default())
            )
        );
        assert!(!error.is_retryable());
    }
}
