//! KorService2 outbound adapter.
//!
//! This module provides the reqwest implementation of the `TourSource` port
//! together with its retry policy.

mod client;
mod dto;
mod result_codes;
mod retry;
mod transport;

pub use client::{AREA_CODE_ROWS, DEFAULT_BASE_URL, KorServiceConfig, KorServiceSource, MOBILE_APP};
pub use result_codes::friendly_message;
pub use retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, RetryPolicy, RetrySleeper, TokioSleeper};
pub use transport::{DEFAULT_TIMEOUT, ReqwestTransport, TIMEOUT_MESSAGE, TourApiTransport};
