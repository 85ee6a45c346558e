//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Concrete provider implementations (CoinGecko)

mod traits;

pub mod coingecko;

// Re-exports
pub use traits::MarketDataProvider;
