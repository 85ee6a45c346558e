//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases for common identifiers (Currency)
//! - `coin` - One asset row of a markets listing (CoinMarket)
//! - `snapshot` - The full replace-on-refresh listing (MarketSnapshot)
//! - `query` - Listing request parameters (MarketsQuery, MarketOrder)

mod coin;
mod query;
mod snapshot;
mod types;

pub use coin::CoinMarket;
pub use query::{MarketOrder, MarketsQuery, DEFAULT_PER_PAGE};
pub use snapshot::MarketSnapshot;
pub use types::Currency;
