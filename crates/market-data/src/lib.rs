//! Coinboard Market Data Crate
//!
//! This crate fetches cryptocurrency market listings for the Coinboard
//! dashboard.
//!
//! # Overview
//!
//! The market data crate supports:
//! - A provider abstraction with a CoinGecko implementation
//! - Error classification for retry decisions
//! - Bounded exponential backoff on rate limiting
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  SnapshotFetcher |  (retry loop, injected sleeper)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (CoinGecko)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  MarketSnapshot  |  (ordered CoinMarket rows)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`CoinMarket`] - One asset row: price, 24h range, market cap, volume
//! - [`MarketSnapshot`] - Full listing, replaced wholesale on every refresh
//! - [`MarketsQuery`] - Listing request parameters
//! - [`SnapshotFetcher`] - Provider wrapper with retry policy
//! - [`MarketDataError`] - Error taxonomy with [`RetryClass`]

pub mod errors;
pub mod fetcher;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass, FETCH_FAILED_MESSAGE, GENERIC_ERROR_MESSAGE};
pub use fetcher::{RetryPolicy, Sleeper, SnapshotFetcher, TokioSleeper};
pub use models::{
    CoinMarket, Currency, MarketOrder, MarketSnapshot, MarketsQuery, DEFAULT_PER_PAGE,
};
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::MarketDataProvider;
