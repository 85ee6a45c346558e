//! CoinGecko market data provider.
//!
//! Fetches the `coins/markets` listing: one row per asset with price,
//! 24h range, market cap, volume, all-time high and 24h change.
//!
//! The public endpoint is keyless but aggressively rate limited; a demo
//! API key can be supplied to raise the limit.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};

use crate::errors::MarketDataError;
use crate::models::{MarketSnapshot, MarketsQuery};
use crate::provider::MarketDataProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying a demo-plan API key
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// CoinGecko provider for cryptocurrency market listings.
///
/// # Example
///
/// ```ignore
/// use coinboard_market_data::provider::coingecko::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new();
/// let snapshot = provider.fetch_markets(&MarketsQuery::default()).await?;
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    /// Create a provider against the public API with the default timeout.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, REQUEST_TIMEOUT)
    }

    /// Create a provider against a custom API root (proxies, mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Attach a demo API key, sent on every request.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    /// Map a response status onto the error taxonomy.
    fn check_status(status: StatusCode) -> Result<(), MarketDataError> {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::FetchFailed {
                provider: PROVIDER_ID.to_string(),
                status: Some(status.as_u16()),
            });
        }

        Ok(())
    }

    fn parse_markets(body: &str) -> Result<MarketSnapshot, MarketDataError> {
        serde_json::from_str(body).map_err(|e| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_markets(&self, query: &MarketsQuery) -> Result<MarketSnapshot, MarketDataError> {
        let url = self.markets_url();
        debug!(
            "CoinGecko: GET {} (per_page={}, order={})",
            url,
            query.per_page,
            query.order.as_str()
        );

        let mut request = self.client.get(&url).query(&query.to_params());
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if let Err(e) = Self::check_status(status) {
            warn!("CoinGecko: markets request returned {}", status);
            return Err(e);
        }

        let body = response.text().await?;
        let snapshot = Self::parse_markets(&body)?;
        debug!("CoinGecko: received {} coins", snapshot.len());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = CoinGeckoProvider::new();
        assert_eq!(provider.id(), "COINGECKO");
    }

    #[test]
    fn test_markets_url_trims_trailing_slash() {
        let provider =
            CoinGeckoProvider::with_base_url("http://localhost:9000/api/v3/", REQUEST_TIMEOUT);
        assert_eq!(
            provider.markets_url(),
            "http://localhost:9000/api/v3/coins/markets"
        );
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let provider = CoinGeckoProvider::new().with_api_key(Some("  ".to_string()));
        assert!(provider.api_key.is_none());

        let provider = CoinGeckoProvider::new().with_api_key(Some("demo-key".to_string()));
        assert_eq!(provider.api_key.as_deref(), Some("demo-key"));
    }

    #[test]
    fn test_status_429_is_rate_limited() {
        let err = CoinGeckoProvider::check_status(StatusCode::TOO_MANY_REQUESTS).unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[test]
    fn test_status_5xx_is_fetch_failed() {
        let err = CoinGeckoProvider::check_status(StatusCode::SERVICE_UNAVAILABLE).unwrap_err();
        assert_eq!(
            err,
            MarketDataError::FetchFailed {
                provider: "COINGECKO".to_string(),
                status: Some(503),
            }
        );
        assert_eq!(err.to_string(), "Failed to fetch data");
    }

    #[test]
    fn test_status_ok_passes() {
        assert!(CoinGeckoProvider::check_status(StatusCode::OK).is_ok());
    }

    #[test]
    fn test_parse_markets() {
        let body = r#"[
            {"id":"bitcoin","symbol":"btc","name":"Bitcoin","image":"b.png","current_price":64000,
             "market_cap":1260000000000,"total_volume":30000000000,"high_24h":65000,"low_24h":63000,
             "price_change_percentage_24h":1.5,"ath":73738},
            {"id":"ethereum","symbol":"eth","name":"Ethereum","image":"e.png",
             "current_price":3100.12,
             "market_cap":372000000000,"total_volume":15000000000,"high_24h":3200,"low_24h":3050,
             "price_change_percentage_24h":-0.8,"ath":4878}
        ]"#;

        let snapshot = CoinGeckoProvider::parse_markets(body).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].current_price, dec!(3100.12));
    }

    #[test]
    fn test_parse_markets_rejects_error_object() {
        let body = r#"{
            "status": {"error_code": 429, "error_message": "You've exceeded the Rate Limit"}
        }"#;
        let err = CoinGeckoProvider::parse_markets(body).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidResponse { .. }));
    }
}
