//! Snapshot fetching with bounded exponential backoff.
//!
//! [`SnapshotFetcher`] wraps a single [`MarketDataProvider`] and retries
//! rate-limited requests on the schedule described by [`RetryPolicy`].
//! Delays go through an injected [`Sleeper`].

mod policy;
mod sleeper;

pub use policy::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};
pub use sleeper::{Sleeper, TokioSleeper};

use std::sync::Arc;

use log::{debug, warn};

use crate::errors::{MarketDataError, RetryClass};
use crate::models::{MarketSnapshot, MarketsQuery};
use crate::provider::MarketDataProvider;

/// Retrieves a fresh [`MarketSnapshot`], tolerating transient rate limiting.
pub struct SnapshotFetcher {
    provider: Arc<dyn MarketDataProvider>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
    query: MarketsQuery,
}

impl SnapshotFetcher {
    /// Create a fetcher with the default policy, query and tokio timer.
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            sleeper: Arc::new(TokioSleeper),
            policy: RetryPolicy::default(),
            query: MarketsQuery::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_query(mut self, query: MarketsQuery) -> Self {
        self.query = query;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Fetch one snapshot.
    ///
    /// Rate-limited attempts are retried after `base_delay * 2^attempt`
    /// while `attempt <= max_retries`. A rate limit past the last retry is
    /// reported as [`MarketDataError::FetchFailed`]; every other error is
    /// returned on first occurrence.
    pub async fn fetch(&self) -> Result<MarketSnapshot, MarketDataError> {
        let mut attempt: u32 = 1;

        loop {
            match self.provider.fetch_markets(&self.query).await {
                Ok(snapshot) => {
                    if attempt > 1 {
                        debug!(
                            "{}: snapshot fetched after {} attempts",
                            self.provider.id(),
                            attempt
                        );
                    }
                    return Ok(snapshot);
                }
                Err(e) if e.retry_class() == RetryClass::WithBackoff => {
                    if !self.policy.allows_retry(attempt) {
                        warn!(
                            "{}: still rate limited after {} retries, giving up",
                            self.provider.id(),
                            self.policy.max_retries
                        );
                        return Err(MarketDataError::FetchFailed {
                            provider: self.provider.id().to_string(),
                            status: Some(429),
                        });
                    }

                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        "{}: rate limited on attempt {}, retrying in {:?}",
                        self.provider.id(),
                        attempt,
                        delay
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoinMarket;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // =========================================================================
    // Test doubles
    // =========================================================================

    #[derive(Default)]
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<MarketSnapshot, MarketDataError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<MarketSnapshot, MarketDataError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl MarketDataProvider for ScriptedProvider {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        async fn fetch_markets(
            &self,
            _query: &MarketsQuery,
        ) -> Result<MarketSnapshot, MarketDataError> {
            *self.calls.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(MarketDataError::network("script exhausted")))
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn delays(&self) -> Vec<Duration> {
            self.delays.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().unwrap().push(duration);
        }
    }

    fn rate_limited() -> Result<MarketSnapshot, MarketDataError> {
        Err(MarketDataError::RateLimited {
            provider: "SCRIPTED".to_string(),
        })
    }

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot::new(vec![CoinMarket::new(
            "bitcoin",
            "Bitcoin",
            "btc",
            dec!(64000),
        )])
    }

    fn fetcher(
        provider: Arc<ScriptedProvider>,
        sleeper: Arc<RecordingSleeper>,
    ) -> SnapshotFetcher {
        SnapshotFetcher::new(provider).with_sleeper(sleeper)
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn test_success_without_retry() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(snapshot())]));
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = fetcher(provider.clone(), sleeper.clone()).fetch().await;

        assert_eq!(result.unwrap(), snapshot());
        assert_eq!(provider.calls(), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_three_rate_limits_then_success() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            rate_limited(),
            rate_limited(),
            rate_limited(),
            Ok(snapshot()),
        ]));
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = fetcher(provider.clone(), sleeper.clone()).fetch().await;

        assert_eq!(result.unwrap(), snapshot());
        assert_eq!(provider.calls(), 4);
        assert_eq!(
            sleeper.delays(),
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8)
            ]
        );
    }

    #[tokio::test]
    async fn test_fourth_rate_limit_escalates_to_fetch_failed() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            rate_limited(),
            rate_limited(),
            rate_limited(),
            rate_limited(),
            Ok(snapshot()),
        ]));
        let sleeper = Arc::new(RecordingSleeper::default());

        let err = fetcher(provider.clone(), sleeper.clone())
            .fetch()
            .await
            .unwrap_err();

        assert!(matches!(err, MarketDataError::FetchFailed { .. }));
        assert_eq!(err.to_string(), "Failed to fetch data");
        assert_eq!(provider.calls(), 4);
        assert_eq!(sleeper.delays().len(), 3);
    }

    #[tokio::test]
    async fn test_non_rate_limit_failure_is_not_retried() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(MarketDataError::FetchFailed {
                provider: "SCRIPTED".to_string(),
                status: Some(500),
            }),
            Ok(snapshot()),
        ]));
        let sleeper = Arc::new(RecordingSleeper::default());

        let err = fetcher(provider.clone(), sleeper.clone())
            .fetch()
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch data");
        assert_eq!(provider.calls(), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_network_error_carries_message() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(MarketDataError::network(
            "connection refused",
        ))]));
        let sleeper = Arc::new(RecordingSleeper::default());

        let err = fetcher(provider, sleeper).fetch().await.unwrap_err();

        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_custom_policy() {
        let provider = Arc::new(ScriptedProvider::new(vec![rate_limited(), rate_limited()]));
        let sleeper = Arc::new(RecordingSleeper::default());

        let err = fetcher(provider.clone(), sleeper.clone())
            .with_policy(RetryPolicy::new(1, Duration::from_millis(10)))
            .fetch()
            .await
            .unwrap_err();

        assert!(matches!(err, MarketDataError::FetchFailed { .. }));
        assert_eq!(provider.calls(), 2);
        assert_eq!(sleeper.delays(), vec![Duration::from_millis(20)]);
    }
}
