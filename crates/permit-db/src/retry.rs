//! Capped exponential backoff for throttled calls.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt before giving up.
    pub max_retries: u32,
    pub base: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base: Duration::from_millis(2_000),
            max_delay: Duration::from_millis(10_000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): `min(base * 2^retry, max_delay)`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max_delay)
    }

    /// The full sequence of delays a permanently throttled call goes through.
    pub fn schedule(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..=self.max_retries).map(|retry| self.delay_for(retry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_doubles_then_caps() {
        let delays: Vec<u128> = RetryPolicy::default()
            .schedule()
            .map(|d| d.as_millis())
            .collect();
        assert_eq!(delays, vec![4_000, 8_000, 10_000, 10_000, 10_000]);
    }

    #[test]
    fn huge_retry_numbers_saturate_at_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(64), policy.max_delay);
    }

    #[test]
    fn zero_retries_means_empty_schedule() {
        let policy = RetryPolicy {
            max_retries: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.schedule().count(), 0);
    }
}
