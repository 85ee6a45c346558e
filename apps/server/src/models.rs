use std::str::FromStr;

use chrono::{DateTime, Utc};
use coinboard_core::formatters::{
    format_currency, format_large_number, format_percentage, format_volume_number,
};
use coinboard_core::refresh::{DashboardState, RefreshOutcome};
use coinboard_core::table::{
    Column, MarketCapFilter, PriceRange, SortDirection, SortField, SortState, TablePage,
    TableQuery, COLUMNS,
};
use coinboard_market_data::CoinMarket;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query string of `GET /markets`.
///
/// Prices arrive as raw strings so an empty form input means "no bound".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketsParams {
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub market_cap: Option<MarketCapFilter>,
    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,
    pub page: Option<usize>,
}

fn parse_bound(raw: Option<&str>) -> coinboard_core::Result<Option<Decimal>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Ok(Some(Decimal::from_str(value)?)),
    }
}

impl MarketsParams {
    pub fn into_query(self) -> coinboard_core::Result<TableQuery> {
        let price_range = PriceRange {
            min: parse_bound(self.min_price.as_deref())?,
            max: parse_bound(self.max_price.as_deref())?,
        };
        let sort = self
            .sort
            .map(|field| SortState::new(field, self.direction.unwrap_or_default()));

        Ok(TableQuery {
            search: self.search.unwrap_or_default(),
            price_range,
            market_cap: self.market_cap.unwrap_or_default(),
            sort,
            page: self.page.unwrap_or(1),
        })
    }
}

/// One table row with raw metrics and display strings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRow {
    pub id: String,
    pub name: String,
    /// Uppercased ticker
    pub symbol: String,
    pub image: String,
    pub current_price: Decimal,
    pub price_change_percentage_24h: Option<Decimal>,
    pub high_24h: Option<Decimal>,
    pub low_24h: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub total_volume: Option<Decimal>,
    pub price_display: String,
    pub price_change_display: Option<String>,
    pub high_24h_display: Option<String>,
    pub low_24h_display: Option<String>,
    pub market_cap_display: Option<String>,
    pub volume_display: Option<String>,
}

impl From<&CoinMarket> for MarketRow {
    fn from(coin: &CoinMarket) -> Self {
        Self {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            image: coin.image.clone(),
            current_price: coin.current_price,
            price_change_percentage_24h: coin.price_change_percentage_24h,
            high_24h: coin.high_24h,
            low_24h: coin.low_24h,
            market_cap: coin.market_cap,
            total_volume: coin.total_volume,
            price_display: format_currency(coin.current_price),
            price_change_display: coin.price_change_percentage_24h.map(format_percentage),
            high_24h_display: coin.high_24h.map(format_currency),
            low_24h_display: coin.low_24h.map(format_currency),
            market_cap_display: coin.market_cap.map(format_large_number),
            volume_display: coin.total_volume.map(format_volume_number),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketsResponse {
    pub rows: Vec<MarketRow>,
    pub columns: &'static [Column],
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub showing_from: usize,
    pub showing_to: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub loading: bool,
}

impl MarketsResponse {
    pub fn new(page: TablePage, state: DashboardState) -> Self {
        Self {
            rows: page.rows.iter().map(MarketRow::from).collect(),
            columns: &COLUMNS,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
            showing_from: page.showing_from,
            showing_to: page.showing_to,
            last_updated: state.last_updated,
            last_error: state.last_error,
            loading: state.loading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStatus {
    CacheHit,
    Fetched,
    InFlight,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub status: RefreshStatus,
    pub last_updated: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl From<RefreshOutcome> for RefreshResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        match outcome {
            RefreshOutcome::CacheHit { fetched_at } => Self {
                status: RefreshStatus::CacheHit,
                last_updated: Some(fetched_at),
                error: None,
            },
            RefreshOutcome::Fetched { fetched_at, .. } => Self {
                status: RefreshStatus::Fetched,
                last_updated: Some(fetched_at),
                error: None,
            },
            RefreshOutcome::AlreadyInFlight => Self {
                status: RefreshStatus::InFlight,
                last_updated: None,
                error: None,
            },
            RefreshOutcome::Failed(e) => Self {
                status: RefreshStatus::Failed,
                last_updated: None,
                error: Some(e.to_string()),
            },
        }
    }
}
