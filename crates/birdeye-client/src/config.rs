//! Configuration for the Birdeye client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Birdeye public API endpoint
pub const DEFAULT_BASE_URL: &str = "https://public-api.birdeye.so";

/// Default per-attempt request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default lower bound between retries
pub const DEFAULT_RETRY_WAIT_MIN: Duration = Duration::from_millis(500);

/// Default upper bound between retries
pub const DEFAULT_RETRY_WAIT_MAX: Duration = Duration::from_secs(3);

/// Effective client settings.
///
/// Resolved once by [`ClientBuilder::build`](crate::ClientBuilder::build) and
/// never mutated afterwards. Values are taken as given; see
/// [`RetryPolicy`](crate::RetryPolicy) for how inverted wait bounds behave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, without trailing path
    pub base_url: String,

    /// Per-attempt request timeout (zero = no timeout)
    pub timeout: Duration,

    /// Retries after the first attempt (0 = single attempt)
    pub max_retries: u32,

    /// Wait before the first retry
    pub retry_wait_min: Duration,

    /// Cap on the wait between retries
    pub retry_wait_max: Duration,

    /// Random spread applied to each wait, 0.0 to 1.0
    pub jitter_factor: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_wait_min: DEFAULT_RETRY_WAIT_MIN,
            retry_wait_max: DEFAULT_RETRY_WAIT_MAX,
            jitter_factor: 0.0,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |name: &str| lookup(name).and_then(|s| s.trim().parse::<u64>().ok());

        Self {
            base_url: lookup("BIRDEYE_BASE_URL")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.base_url),
            timeout: parsed("BIRDEYE_TIMEOUT_SECS")
                .map_or(defaults.timeout, Duration::from_secs),
            max_retries: lookup("BIRDEYE_MAX_RETRIES")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_wait_min: parsed("BIRDEYE_RETRY_WAIT_MIN_MS")
                .map_or(defaults.retry_wait_min, Duration::from_millis),
            retry_wait_max: parsed("BIRDEYE_RETRY_WAIT_MAX_MS")
                .map_or(defaults.retry_wait_max, Duration::from_millis),
            jitter_factor: lookup("BIRDEYE_RETRY_JITTER")
                .and_then(|s| s.trim().parse::<f64>().ok())
                .map_or(defaults.jitter_factor, |j| j.clamp(0.0, 1.0)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://public-api.birdeye.so");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_wait_min, Duration::from_millis(500));
        assert_eq!(config.retry_wait_max, Duration::from_secs(3));
        assert!(config.jitter_factor.abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_custom_values() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("BIRDEYE_BASE_URL", "http://localhost:8080"),
            ("BIRDEYE_TIMEOUT_SECS", "30"),
            ("BIRDEYE_MAX_RETRIES", "5"),
            ("BIRDEYE_RETRY_WAIT_MIN_MS", "100"),
            ("BIRDEYE_RETRY_WAIT_MAX_MS", "2000"),
            ("BIRDEYE_RETRY_JITTER", "0.25"),
        ]));

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_wait_min, Duration::from_millis(100));
        assert_eq!(config.retry_wait_max, Duration::from_millis(2000));
        assert!((config.jitter_factor - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("BIRDEYE_BASE_URL", ""),
            ("BIRDEYE_TIMEOUT_SECS", "ten"),
            ("BIRDEYE_MAX_RETRIES", "-1"),
            ("BIRDEYE_RETRY_JITTER", "7"),
        ]));

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert!((config.jitter_factor - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = ClientConfig {
            max_retries: 0,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
