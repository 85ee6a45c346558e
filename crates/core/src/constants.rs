//! Dashboard constants.

use std::time::Duration;

/// Store key holding the serialized snapshot.
pub const CACHE_DATA_KEY: &str = "cryptoData";

/// Store key holding the retrieval time, epoch milliseconds as a decimal string.
pub const CACHE_TIME_KEY: &str = "cryptoDataTime";

/// How long a cached snapshot may be served without a new fetch.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Period of the background refresh task.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Market cap at or above which an asset is in the `high` bucket ($10B).
pub const DEFAULT_HIGH_CAP_THRESHOLD: i64 = 10_000_000_000;

/// Market cap at or above which an asset is in the `medium` bucket ($1B).
pub const DEFAULT_MEDIUM_CAP_THRESHOLD: i64 = 1_000_000_000;

/// Message shown after a simulated checkout.
pub const CHECKOUT_SUCCESS_MESSAGE: &str = "Purchase completed successfully!";
