//! Tests for RefreshService and ScheduledRefresh.
//!
//! # Contract Points
//!
//! 1. A fresh cache entry is adopted without fetching
//! 2. A miss fetches and writes the cache with the current time
//! 3. A failed fetch leaves the previous snapshot and records the error
//! 4. Overlapping refreshes never fetch twice
//! 5. The scheduler stops ticking once cancelled

#[cfg(test)]
mod tests {
    use crate::cache::{FreshnessCache, KeyValueStore, MemoryStore};
    use crate::constants::CACHE_TIME_KEY;
    use crate::refresh::{
        Clock, RefreshOutcome, RefreshService, RefreshServiceTrait, ScheduledRefresh,
        SnapshotSource,
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
    use coinboard_market_data::{CoinMarket, MarketDataError, MarketSnapshot};
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::Notify;

    // =========================================================================
    // Test doubles
    // =========================================================================

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn at(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        fn advance(&self, by: ChronoDuration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    #[derive(Default)]
    struct MockSource {
        responses: Mutex<VecDeque<Result<MarketSnapshot, MarketDataError>>>,
        calls: Mutex<usize>,
        gate: Option<Arc<Notify>>,
    }

    impl MockSource {
        fn with_responses(responses: Vec<Result<MarketSnapshot, MarketDataError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Self::default()
            }
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl SnapshotSource for MockSource {
        async fn fetch_snapshot(&self) -> Result<MarketSnapshot, MarketDataError> {
            *self.calls.lock().unwrap() += 1;
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(snapshot_of(&["bitcoin"])))
        }
    }

    fn snapshot_of(ids: &[&str]) -> MarketSnapshot {
        ids.iter()
            .map(|id| CoinMarket::new(*id, *id, *id, dec!(1)))
            .collect()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn fetch_failed() -> MarketDataError {
        MarketDataError::FetchFailed {
            provider: "MOCK".to_string(),
            status: Some(500),
        }
    }

    struct Harness {
        service: Arc<RefreshService>,
        source: Arc<MockSource>,
        store: Arc<MemoryStore>,
        clock: Arc<ManualClock>,
    }

    fn harness(source: MockSource, window: Duration) -> Harness {
        let source = Arc::new(source);
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::at(t0()));
        let cache = FreshnessCache::new(store.clone(), window);
        let service = Arc::new(RefreshService::new(source.clone(), cache, clock.clone()));
        Harness {
            service,
            source,
            store,
            clock,
        }
    }

    // =========================================================================
    // RefreshService
    // =========================================================================

    #[tokio::test]
    async fn test_miss_fetches_and_writes_cache() {
        let h = harness(
            MockSource::with_responses(vec![Ok(snapshot_of(&["bitcoin", "ethereum"]))]),
            Duration::from_secs(300),
        );

        let outcome = h.service.refresh().await;

        assert_eq!(
            outcome,
            RefreshOutcome::Fetched {
                fetched_at: t0(),
                coins: 2
            }
        );
        assert_eq!(h.source.calls(), 1);

        let state = h.service.state();
        assert_eq!(state.snapshot.unwrap().len(), 2);
        assert_eq!(state.last_updated, Some(t0()));
        assert!(state.last_error.is_none());
        assert!(!state.loading);

        assert_eq!(
            h.store.get(CACHE_TIME_KEY).unwrap(),
            Some(t0().timestamp_millis().to_string())
        );
    }

    #[tokio::test]
    async fn test_hit_within_window_skips_fetch() {
        let h = harness(MockSource::default(), Duration::from_secs(300));

        h.service.refresh().await;
        h.clock.advance(ChronoDuration::seconds(120));
        let outcome = h.service.refresh().await;

        assert_eq!(outcome, RefreshOutcome::CacheHit { fetched_at: t0() });
        assert_eq!(h.source.calls(), 1);
        assert_eq!(h.service.state().last_updated, Some(t0()));
    }

    #[tokio::test]
    async fn test_stale_entry_triggers_fetch() {
        let h = harness(MockSource::default(), Duration::from_secs(300));

        h.service.refresh().await;
        h.clock.advance(ChronoDuration::seconds(301));
        let outcome = h.service.refresh().await;

        assert!(matches!(outcome, RefreshOutcome::Fetched { .. }));
        assert_eq!(h.source.calls(), 2);
        assert_eq!(
            h.service.state().last_updated,
            Some(t0() + ChronoDuration::seconds(301))
        );
    }

    #[tokio::test]
    async fn test_cache_from_previous_run_is_adopted() {
        let h = harness(MockSource::default(), Duration::from_secs(300));
        let earlier = t0() - ChronoDuration::seconds(30);
        FreshnessCache::new(h.store.clone(), Duration::from_secs(300))
            .write(&snapshot_of(&["solana"]), earlier)
            .unwrap();

        let outcome = h.service.refresh().await;

        assert_eq!(outcome, RefreshOutcome::CacheHit { fetched_at: earlier });
        assert_eq!(h.source.calls(), 0);
        let state = h.service.state();
        assert_eq!(state.snapshot.unwrap()[0].id, "solana");
        assert_eq!(state.last_updated, Some(earlier));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_snapshot() {
        let h = harness(
            MockSource::with_responses(vec![
                Ok(snapshot_of(&["bitcoin"])),
                Err(fetch_failed()),
            ]),
            Duration::ZERO,
        );

        h.service.refresh().await;
        let outcome = h.service.refresh().await;

        assert_eq!(outcome, RefreshOutcome::Failed(fetch_failed()));
        assert!(!outcome.is_success());
        let state = h.service.state();
        assert_eq!(state.snapshot.unwrap()[0].id, "bitcoin");
        assert_eq!(state.last_updated, Some(t0()));
        assert_eq!(state.last_error.as_deref(), Some("Failed to fetch data"));
    }

    #[tokio::test]
    async fn test_success_clears_last_error() {
        let h = harness(
            MockSource::with_responses(vec![
                Err(MarketDataError::network("connection refused")),
                Ok(snapshot_of(&["bitcoin"])),
            ]),
            Duration::ZERO,
        );

        h.service.refresh().await;
        assert_eq!(
            h.service.state().last_error.as_deref(),
            Some("connection refused")
        );
        assert!(h.service.state().snapshot.is_none());

        h.service.refresh().await;
        assert!(h.service.state().last_error.is_none());
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_fresh_cache() {
        let h = harness(MockSource::default(), Duration::from_secs(300));

        h.service.refresh().await;
        let outcome = h.service.force_refresh().await;

        assert!(matches!(outcome, RefreshOutcome::Fetched { .. }));
        assert_eq!(h.source.calls(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_refresh_is_rejected() {
        let gate = Arc::new(Notify::new());
        let h = harness(
            MockSource::default().gated(gate.clone()),
            Duration::from_secs(300),
        );

        let service = h.service.clone();
        let first = tokio::spawn(async move { service.refresh().await });

        while !h.service.state().loading {
            tokio::task::yield_now().await;
        }

        assert_eq!(h.service.refresh().await, RefreshOutcome::AlreadyInFlight);
        assert_eq!(
            h.service.force_refresh().await,
            RefreshOutcome::AlreadyInFlight
        );

        gate.notify_one();
        let outcome = first.await.unwrap();

        assert!(matches!(outcome, RefreshOutcome::Fetched { .. }));
        assert_eq!(h.source.calls(), 1);
        assert!(!h.service.state().loading);
    }

    // =========================================================================
    // ScheduledRefresh
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_ticks_until_cancelled() {
        let h = harness(MockSource::default(), Duration::ZERO);

        let mut scheduled = ScheduledRefresh::start(h.service.clone(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(150)).await;
        assert_eq!(h.source.calls(), 3);

        scheduled.cancel();
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(h.source.calls(), 3);
        assert!(scheduled.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_scheduler() {
        let h = harness(MockSource::default(), Duration::ZERO);

        let scheduled = ScheduledRefresh::start(h.service.clone(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(scheduled);

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(h.source.calls(), 1);
    }
}
