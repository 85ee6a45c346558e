//! Table view projection.
//!
//! Turns a [`MarketSnapshot`](coinboard_market_data::MarketSnapshot) plus the
//! current view state into the rows of one page.

pub mod model;
pub mod projector;

pub use model::{
    Column, MarketCapFilter, PriceRange, SortDirection, SortField, SortState, TablePage,
    TableQuery, COLUMNS,
};
pub use projector::{compare_by, TableProjector};
