//! Coinboard Core - caching, refresh orchestration, table projection and
//! checkout validation.
//!
//! Market data comes from `coinboard-market-data`; this crate decides when
//! to fetch it, how long to keep it, and how to present it.

pub mod cache;
pub mod checkout;
pub mod constants;
pub mod errors;
pub mod formatters;
pub mod refresh;
pub mod settings;
pub mod table;

pub use settings::{DashboardSettings, MarketCapThresholds};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
