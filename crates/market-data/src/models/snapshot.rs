use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::coin::CoinMarket;

/// The full listing returned by one successful fetch.
///
/// A snapshot is replaced wholesale on every refresh, never merged. It
/// serializes as a bare JSON array, the same shape the provider returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketSnapshot(Vec<CoinMarket>);

impl MarketSnapshot {
    pub fn new(coins: Vec<CoinMarket>) -> Self {
        Self(coins)
    }
}

impl Deref for MarketSnapshot {
    type Target = [CoinMarket];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<CoinMarket>> for MarketSnapshot {
    fn from(coins: Vec<CoinMarket>) -> Self {
        Self(coins)
    }
}

impl FromIterator<CoinMarket> for MarketSnapshot {
    fn from_iter<I: IntoIterator<Item = CoinMarket>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
