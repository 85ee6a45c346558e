use coinboard_market_data::CoinMarket;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column a table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "price_change")]
    PriceChange,
    #[serde(rename = "high_24h")]
    High24h,
    #[serde(rename = "low_24h")]
    Low24h,
    #[serde(rename = "market_cap")]
    MarketCap,
    #[serde(rename = "volume")]
    Volume,
}

impl SortField {
    /// Comparison key; a missing metric sorts as zero.
    pub fn key(&self, coin: &CoinMarket) -> Decimal {
        let value = match self {
            Self::Price => Some(coin.current_price),
            Self::PriceChange => coin.price_change_percentage_24h,
            Self::High24h => coin.high_24h,
            Self::Low24h => coin.low_24h,
            Self::MarketCap => coin.market_cap,
            Self::Volume => coin.total_volume,
        };
        value.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-click behavior: the same column flips direction, a new column
    /// starts ascending.
    pub fn toggle(current: Option<SortState>, field: SortField) -> SortState {
        match current {
            Some(state) if state.field == field => {
                SortState::new(field, state.direction.reversed())
            }
            _ => SortState::new(field, SortDirection::Asc),
        }
    }
}

/// Market-cap bucket filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarketCapFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

/// Inclusive price bounds; an unset bound does not filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    pub fn contains(&self, price: Decimal) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

/// View state driving one projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQuery {
    /// Case-insensitive substring of name or symbol; empty matches all
    pub search: String,
    pub price_range: PriceRange,
    pub market_cap: MarketCapFilter,
    /// `None` keeps provider order
    pub sort: Option<SortState>,
    /// 1-based page number
    pub page: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            price_range: PriceRange::default(),
            market_cap: MarketCapFilter::All,
            sort: None,
            page: 1,
        }
    }
}

/// One page of projected rows plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub rows: Vec<CoinMarket>,
    /// Page actually served (1-based)
    pub page: usize,
    pub page_size: usize,
    /// Rows left after filtering
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based position of the first row shown, 0 when empty
    pub showing_from: usize,
    /// 1-based position of the last row shown, 0 when empty
    pub showing_to: usize,
}

impl TablePage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Column header metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub label: &'static str,
    pub field: SortField,
    pub sortable: bool,
}

/// Sortable metric columns in display order.
pub const COLUMNS: [Column; 6] = [
    Column {
        label: "Price",
        field: SortField::Price,
        sortable: true,
    },
    Column {
        label: "24h Change",
        field: SortField::PriceChange,
        sortable: true,
    },
    Column {
        label: "24h High",
        field: SortField::High24h,
        sortable: true,
    },
    Column {
        label: "24h Low",
        field: SortField::Low24h,
        sortable: true,
    },
    Column {
        label: "Market Cap",
        field: SortField::MarketCap,
        sortable: true,
    },
    Column {
        label: "Volume (24h)",
        field: SortField::Volume,
        sortable: true,
    },
];
