use std::cmp::Ordering;

use coinboard_market_data::CoinMarket;

use super::model::{MarketCapFilter, SortDirection, SortField, TablePage, TableQuery};
use crate::settings::MarketCapThresholds;

/// Derives the displayed rows from a snapshot and the current view state.
///
/// Projection is a pure function of its inputs: filter by search text,
/// price range and market-cap bucket, sort, then paginate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableProjector {
    page_size: usize,
    thresholds: MarketCapThresholds,
}

impl TableProjector {
    /// `page_size` is clamped to at least one row.
    pub fn new(page_size: usize, thresholds: MarketCapThresholds) -> Self {
        Self {
            page_size: page_size.max(1),
            thresholds,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn project(&self, coins: &[CoinMarket], query: &TableQuery) -> TablePage {
        let needle = query.search.to_lowercase();

        let mut rows: Vec<&CoinMarket> = coins
            .iter()
            .filter(|coin| matches_search(coin, &needle))
            .filter(|coin| query.price_range.contains(coin.current_price))
            .filter(|coin| self.matches_market_cap(coin, query.market_cap))
            .collect();

        if let Some(sort) = query.sort {
            rows.sort_by(|a, b| compare_by(sort.field, sort.direction, a, b));
        }

        self.paginate(rows, query.page)
    }

    fn matches_market_cap(&self, coin: &CoinMarket, filter: MarketCapFilter) -> bool {
        let cap = coin.market_cap_or_zero();
        match filter {
            MarketCapFilter::All => true,
            MarketCapFilter::High => cap >= self.thresholds.high,
            MarketCapFilter::Medium => {
                cap >= self.thresholds.medium && cap < self.thresholds.high
            }
            MarketCapFilter::Low => cap < self.thresholds.medium,
        }
    }

    fn paginate(&self, rows: Vec<&CoinMarket>, requested_page: usize) -> TablePage {
        let total_items = rows.len();
        let total_pages = total_items.div_ceil(self.page_size);

        // A page outside the result set (e.g. after a filter shrank it) falls back
        // to the first page.
        let page = if (1..=total_pages).contains(&requested_page) {
            requested_page
        } else {
            1
        };

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(total_items);
        let page_rows: Vec<CoinMarket> = rows
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|coin| (*coin).clone())
            .collect();

        let (showing_from, showing_to) = if page_rows.is_empty() {
            (0, 0)
        } else {
            (start + 1, end)
        };

        TablePage {
            rows: page_rows,
            page,
            page_size: self.page_size,
            total_items,
            total_pages,
            showing_from,
            showing_to,
        }
    }
}

fn matches_search(coin: &CoinMarket, needle: &str) -> bool {
    needle.is_empty()
        || coin.name.to_lowercase().contains(needle)
        || coin.symbol.to_lowercase().contains(needle)
}

/// Stable-sort comparator for one column and direction.
pub fn compare_by(
    field: SortField,
    direction: SortDirection,
    a: &CoinMarket,
    b: &CoinMarket,
) -> Ordering {
    let ordering = field.key(a).cmp(&field.key(b));
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}
