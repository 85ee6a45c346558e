use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// One asset row of the `coins/markets` listing.
///
/// Field names follow the provider's wire format so a snapshot round-trips
/// through the cache unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    /// Provider identifier (e.g., "bitcoin")
    pub id: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker symbol, lowercase on the wire (e.g., "btc")
    pub symbol: String,

    /// Logo URL
    #[serde(default)]
    pub image: String,

    /// Current price in the quote currency
    #[serde(deserialize_with = "decimal_or_zero")]
    pub current_price: Decimal,

    #[serde(default)]
    pub high_24h: Option<Decimal>,

    #[serde(default)]
    pub low_24h: Option<Decimal>,

    #[serde(default)]
    pub market_cap: Option<Decimal>,

    #[serde(default)]
    pub total_volume: Option<Decimal>,

    /// All-time-high price
    #[serde(default)]
    pub ath: Option<Decimal>,

    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
}

impl CoinMarket {
    /// Create a coin row with the identity fields and a price; every other
    /// metric is left unset.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        current_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            image: String::new(),
            current_price,
            high_24h: None,
            low_24h: None,
            market_cap: None,
            total_volume: None,
            ath: None,
            price_change_percentage_24h: None,
        }
    }

    /// Market capitalization, with a missing value counted as zero.
    pub fn market_cap_or_zero(&self) -> Decimal {
        self.market_cap.unwrap_or_default()
    }
}

fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer).map(Option::unwrap_or_default)
}
