//! Retry policy for transient provider failures.

use std::time::Duration;

use async_trait::async_trait;

/// Attempts made before a transient failure is surfaced.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles for each further retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Exponential backoff settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first call.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt number `attempt` (one-based).
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use mytrip::outbound::tour_api::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_after(1), Duration::from_secs(1));
    /// assert_eq!(policy.delay_after(3), Duration::from_secs(4));
    /// ```
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Attempt count, never below one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Async sleep abstraction so tests can observe backoff without waiting.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Sleep for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 4)]
    #[case(4, 8)]
    fn delays_double_per_attempt(#[case] attempt: u32, #[case] seconds: u64) {
        assert_eq!(
            RetryPolicy::default().delay_after(attempt),
            Duration::from_secs(seconds)
        );
    }

    #[rstest]
    fn huge_attempts_saturate() {
        let delay = RetryPolicy::default().delay_after(200);
        assert!(delay >= Duration::from_secs(1 << 30));
    }

    #[rstest]
    fn zero_attempts_still_calls_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            base_delay: DEFAULT_BASE_DELAY,
        };
        assert_eq!(policy.attempts(), 1);
    }
}
