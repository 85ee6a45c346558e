//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{MarketSnapshot, MarketsQuery};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// A provider performs exactly one request per call; retrying is the
/// job of [`SnapshotFetcher`](crate::fetcher::SnapshotFetcher).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use coinboard_market_data::provider::MarketDataProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn fetch_markets(
///         &self,
///         query: &MarketsQuery,
///     ) -> Result<MarketSnapshot, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINGECKO".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Fetch one markets listing.
    ///
    /// # Returns
    ///
    /// The listing on success. HTTP 429 must map to
    /// [`MarketDataError::RateLimited`] so the fetcher can back off; any
    /// other non-success response maps to [`MarketDataError::FetchFailed`].
    async fn fetch_markets(&self, query: &MarketsQuery) -> Result<MarketSnapshot, MarketDataError>;
}
