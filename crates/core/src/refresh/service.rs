use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coinboard_market_data::{MarketDataError, MarketSnapshot};
use log::{debug, info, warn};

use super::clock::Clock;
use super::source::SnapshotSource;
use crate::cache::FreshnessCache;

/// What the dashboard currently shows.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    /// Last adopted snapshot; kept across failed refreshes
    pub snapshot: Option<Arc<MarketSnapshot>>,
    /// Retrieval time of `snapshot`
    pub last_updated: Option<DateTime<Utc>>,
    /// User-facing message of the most recent failed refresh
    pub last_error: Option<String>,
    /// Whether a refresh is running right now
    pub loading: bool,
}

/// Result of one refresh request.
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshOutcome {
    /// A fresh-enough cached snapshot was adopted.
    CacheHit { fetched_at: DateTime<Utc> },
    /// A new snapshot was fetched and cached.
    Fetched {
        fetched_at: DateTime<Utc>,
        coins: usize,
    },
    /// Another refresh was already running; nothing was done.
    AlreadyInFlight,
    /// The fetch failed; the previous snapshot stays in place.
    Failed(MarketDataError),
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::CacheHit { .. } | Self::Fetched { .. })
    }
}

#[async_trait]
pub trait RefreshServiceTrait: Send + Sync {
    /// Adopt the cached snapshot if fresh, otherwise fetch and cache a new one.
    async fn refresh(&self) -> RefreshOutcome;

    /// Fetch a new snapshot regardless of cache freshness.
    async fn force_refresh(&self) -> RefreshOutcome;

    /// Copy of the current dashboard state.
    fn state(&self) -> DashboardState;
}

/// Clears the in-flight flag when the refresh that set it finishes.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Coordinates the freshness cache and the snapshot source.
pub struct RefreshService {
    source: Arc<dyn SnapshotSource>,
    cache: FreshnessCache,
    clock: Arc<dyn Clock>,
    state: RwLock<DashboardState>,
    in_flight: AtomicBool,
}

impl RefreshService {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        cache: FreshnessCache,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            cache,
            clock,
            state: RwLock::new(DashboardState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("Dashboard state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("Dashboard state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn adopt(&self, snapshot: MarketSnapshot, fetched_at: DateTime<Utc>) {
        let mut state = self.write_state();
        state.snapshot = Some(Arc::new(snapshot));
        state.last_updated = Some(fetched_at);
        state.last_error = None;
    }

    async fn run(&self, use_cache: bool) -> RefreshOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("Refresh skipped: another refresh is in flight");
            return RefreshOutcome::AlreadyInFlight;
        };

        self.write_state().last_error = None;

        if use_cache {
            if let Some(cached) = self.cache.read(self.clock.now()) {
                let fetched_at = cached.fetched_at;
                self.adopt(cached.snapshot, fetched_at);
                return RefreshOutcome::CacheHit { fetched_at };
            }
        }

        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                let fetched_at = self.clock.now();
                if let Err(e) = self.cache.write(&snapshot, fetched_at) {
                    warn!("Failed to cache snapshot: {}", e);
                }
                let coins = snapshot.len();
                self.adopt(snapshot, fetched_at);
                info!("Market snapshot refreshed: {} coins", coins);
                RefreshOutcome::Fetched { fetched_at, coins }
            }
            Err(e) => {
                warn!("Market snapshot refresh failed: {}", e);
                self.write_state().last_error = Some(e.to_string());
                RefreshOutcome::Failed(e)
            }
        }
    }
}

#[async_trait]
impl RefreshServiceTrait for RefreshService {
    async fn refresh(&self) -> RefreshOutcome {
        self.run(true).await
    }

    async fn force_refresh(&self) -> RefreshOutcome {
        self.run(false).await
    }

    fn state(&self) -> DashboardState {
        let mut state = self.read_state().clone();
        state.loading = self.in_flight.load(Ordering::Acquire);
        state
    }
}
