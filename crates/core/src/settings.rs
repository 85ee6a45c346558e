//! Dashboard tunables.
//!
//! Defaults match the shipped dashboard; the server overrides them from the
//! environment.

use std::time::Duration;

use coinboard_market_data::{RetryPolicy, DEFAULT_PER_PAGE};
use rust_decimal::Decimal;

use crate::constants::{
    DEFAULT_FRESHNESS_WINDOW, DEFAULT_HIGH_CAP_THRESHOLD, DEFAULT_MEDIUM_CAP_THRESHOLD,
    DEFAULT_PAGE_SIZE, DEFAULT_REFRESH_INTERVAL,
};
use crate::errors::{Error, Result};

/// Boundaries of the market-cap buckets.
///
/// `high` is `>= high`, `medium` is `[medium, high)`, `low` is `< medium`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarketCapThresholds {
    pub high: Decimal,
    pub medium: Decimal,
}

impl MarketCapThresholds {
    pub fn new(high: Decimal, medium: Decimal) -> Result<Self> {
        if medium > high {
            return Err(Error::InvalidConfigValue(format!(
                "medium market cap threshold {} exceeds high threshold {}",
                medium, high
            )));
        }
        Ok(Self { high, medium })
    }
}

impl Default for MarketCapThresholds {
    fn default() -> Self {
        Self {
            high: Decimal::from(DEFAULT_HIGH_CAP_THRESHOLD),
            medium: Decimal::from(DEFAULT_MEDIUM_CAP_THRESHOLD),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardSettings {
    pub freshness_window: Duration,
    pub refresh_interval: Duration,
    pub page_size: usize,
    pub thresholds: MarketCapThresholds,
    /// Rows requested from the provider per refresh
    pub per_page: u32,
    pub retry: RetryPolicy,
}

impl DashboardSettings {
    /// Reject values the dashboard cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidConfigValue(
                "page size must be at least 1".to_string(),
            ));
        }
        if self.per_page == 0 {
            return Err(Error::InvalidConfigValue(
                "per_page must be at least 1".to_string(),
            ));
        }
        if self.refresh_interval.is_zero() {
            return Err(Error::InvalidConfigValue(
                "refresh interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            page_size: DEFAULT_PAGE_SIZE,
            thresholds: MarketCapThresholds::default(),
            per_page: DEFAULT_PER_PAGE,
            retry: RetryPolicy::default(),
        }
    }
}
