use serde::{Deserialize, Serialize};

use super::types::Currency;

/// Default number of rows requested per listing call.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Listing order accepted by the markets endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarketOrder {
    #[default]
    MarketCapDesc,
}

impl MarketOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarketCapDesc => "market_cap_desc",
        }
    }
}

/// Parameters for a markets listing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketsQuery {
    /// Quote currency (e.g., "usd")
    pub vs_currency: Currency,

    pub order: MarketOrder,

    /// Number of rows to return
    pub per_page: u32,

    /// Whether to include 7-day sparkline data
    pub sparkline: bool,
}

impl MarketsQuery {
    pub fn with_per_page(per_page: u32) -> Self {
        Self {
            per_page,
            ..Self::default()
        }
    }

    /// Query string pairs in the order the endpoint documents them.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.to_string()),
            ("order", self.order.as_str().to_string()),
            ("per_page", self.per_page.to_string()),
            ("sparkline", self.sparkline.to_string()),
        ]
    }
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".into(),
            order: MarketOrder::MarketCapDesc,
            per_page: DEFAULT_PER_PAGE,
            sparkline: false,
        }
    }
}
