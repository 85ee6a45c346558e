use async_trait::async_trait;
use coinboard_market_data::{MarketDataError, MarketSnapshot, SnapshotFetcher};

/// Anything that can produce a fresh snapshot on demand.
///
/// The refresh service depends on this seam rather than on the fetcher so
/// tests can script outcomes and hold a fetch open.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot, MarketDataError>;
}

#[async_trait]
impl SnapshotSource for SnapshotFetcher {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot, MarketDataError> {
        self.fetch().await
    }
}
