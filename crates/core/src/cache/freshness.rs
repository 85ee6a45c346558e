use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use coinboard_market_data::MarketSnapshot;
use log::{debug, warn};

use super::store::KeyValueStore;
use crate::constants::{CACHE_DATA_KEY, CACHE_TIME_KEY};
use crate::errors::Result;

/// A snapshot read back from the cache together with its retrieval time.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedSnapshot {
    pub snapshot: MarketSnapshot,
    pub fetched_at: DateTime<Utc>,
}

/// Serves the last snapshot while it is younger than the freshness window.
///
/// Entries live under two keys: the snapshot JSON and the retrieval time in
/// epoch milliseconds. Anything unreadable is a miss, never an error.
pub struct FreshnessCache {
    store: Arc<dyn KeyValueStore>,
    window: Duration,
}

impl FreshnessCache {
    pub fn new(store: Arc<dyn KeyValueStore>, window: Duration) -> Self {
        Self { store, window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns the cached snapshot if one exists and `now - fetched_at` is
    /// below the window.
    pub fn read(&self, now: DateTime<Utc>) -> Option<CachedSnapshot> {
        let raw_time = self.get_key(CACHE_TIME_KEY)?;
        let raw_data = self.get_key(CACHE_DATA_KEY)?;

        let millis: i64 = match raw_time.trim().parse() {
            Ok(millis) => millis,
            Err(e) => {
                warn!("Cache timestamp {:?} is not a number: {}", raw_time, e);
                return None;
            }
        };

        let age_ms = now.timestamp_millis().saturating_sub(millis);
        let window_ms = i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX);
        if age_ms >= window_ms {
            debug!("Cache entry is stale ({}ms >= {}ms)", age_ms, window_ms);
            return None;
        }

        let fetched_at = Utc.timestamp_millis_opt(millis).single()?;
        let snapshot: MarketSnapshot = match serde_json::from_str(&raw_data) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Cached snapshot is malformed, treating as miss: {}", e);
                return None;
            }
        };

        debug!(
            "Cache hit: {} coins fetched {}ms ago",
            snapshot.len(),
            age_ms
        );
        Some(CachedSnapshot {
            snapshot,
            fetched_at,
        })
    }

    /// Persist `snapshot` as retrieved at `fetched_at`, overwriting any prior entry.
    pub fn write(&self, snapshot: &MarketSnapshot, fetched_at: DateTime<Utc>) -> Result<()> {
        let json = serde_json::to_string(snapshot).map_err(crate::errors::StoreError::from)?;
        self.store.set(CACHE_DATA_KEY, &json)?;
        self.store
            .set(CACHE_TIME_KEY, &fetched_at.timestamp_millis().to_string())?;
        Ok(())
    }

    /// Drop the cached entry so the next read misses.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(CACHE_DATA_KEY)?;
        self.store.remove(CACHE_TIME_KEY)?;
        Ok(())
    }

    fn get_key(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read cache key {}: {}", key, e);
                None
            }
        }
    }
}
