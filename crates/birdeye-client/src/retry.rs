//! Retry policy implementation with exponential backoff

use rand::{RngExt, rng};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

use crate::config::ClientConfig;

/// Retry policy used by [`RetryingTransport`](crate::RetryingTransport).
///
/// The wait before retry `n` (zero-based) is `wait_min * 2^n`, capped at
/// `wait_max`. When `wait_max < wait_min` the waits stay at `wait_min`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Wait before the first retry
    pub wait_min: Duration,

    /// Cap on any single wait
    pub wait_max: Duration,

    /// Random spread applied to each wait (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for RetryPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            wait_min: config.retry_wait_min,
            wait_max: config.retry_wait_max,
            jitter_factor: config.jitter_factor.clamp(0.0, 1.0),
        }
    }
}

impl RetryPolicy {
    /// Whether a response status warrants another attempt
    pub fn should_retry_status(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    /// Whether a transport failure warrants another attempt
    pub fn should_retry_error(err: &reqwest::Error) -> bool {
        err.is_connect() || err.is_timeout() || err.is_request()
    }

    /// Upper bound actually applied, never below `wait_min`
    fn effective_max(&self) -> Duration {
        self.wait_max.max(self.wait_min)
    }

    /// Calculate the wait before retry `attempt` (zero-based).
    ///
    /// A server-provided `retry_after` replaces the exponential value but is
    /// still kept inside `[wait_min, wait_max]`. Arithmetic saturates, so
    /// bounds up to [`Duration::MAX`] are accepted.
    pub fn backoff(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let max = self.effective_max();

        let base = retry_after.map_or_else(
            || {
                let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
                self.wait_min
                    .checked_mul(factor)
                    .map_or(max, |exp| exp.min(max))
            },
            |hint| hint.clamp(self.wait_min, max),
        );

        if self.jitter_factor <= 0.0 {
            return base;
        }

        let jitter_range = base.as_secs_f64() * self.jitter_factor;
        let jitter = rng().random_range(-jitter_range..=jitter_range);
        // Out of range (past Duration::MAX) keeps the unjittered wait
        Duration::try_from_secs_f64((base.as_secs_f64() + jitter).max(0.0)).unwrap_or(base)
    }
}

/// Parse a numeric `Retry-After` header (delay-seconds form only)
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
