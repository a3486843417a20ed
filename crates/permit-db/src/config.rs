//! Remote data service configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Configuration for talking to the remote data service.
#[derive(Debug, Clone)]
pub struct DataServiceConfig {
    /// Base URL; `/query` or `/procedure` is appended per call.
    pub base_url: String,
    /// Sent as the `x-api-key` header.
    pub api_key: String,
    /// Target database identifier placed in every payload.
    pub database: String,
    /// Minimum gap between two outbound calls from this process.
    pub min_interval: Duration,
    /// How long a successful read stays servable from the cache.
    pub cache_ttl: Duration,
    /// Backoff schedule for "too many requests" answers.
    pub retry: RetryPolicy,
    /// Timeout for one HTTP exchange.
    pub request_timeout: Duration,
    /// Optional bound on a whole logical call, including pacing waits and
    /// retries. `None` leaves the retry ceiling as the only bound. Off by
    /// default: the default backoff schedule alone sums to 42s, so a 30s
    /// bound would cut throttled calls off before their last retry.
    pub call_deadline: Option<Duration>,
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.airportthai.co.th/proxy/api".into(),
            api_key: String::new(),
            database: "CNXWorkPermit".into(),
            min_interval: Duration::from_millis(2_000),
            cache_ttl: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            request_timeout: Duration::from_secs(30),
            call_deadline: None,
        }
    }
}
