use std::time::Duration;

/// Number of retries after the first rate-limited attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base delay multiplied by `2^attempt`.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Exponential backoff settings for rate-limited fetches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries; the request is sent at most `max_retries + 1` times.
    pub max_retries: u32,

    /// Base delay for the backoff schedule.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retrying after the given failed attempt (counted from 1).
    ///
    /// `base_delay * 2^attempt`, so the default schedule is 2s, 4s, 8s.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor)
    }

    /// Whether another try is allowed after `attempt` failed.
    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt <= self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY)
    }
}
