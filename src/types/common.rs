//! Common domain types for the CoinAPI market data API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::serde_helpers::null_as_default;

/// Aggressor side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TakerSide {
    /// Buyer was the taker
    Buy,
    /// Seller was the taker
    Sell,
    /// Buyer was the taker, inferred by CoinAPI
    BuyEstimated,
    /// Seller was the taker, inferred by CoinAPI
    SellEstimated,
    /// Side could not be determined
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for TakerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TakerSide::Buy => "BUY",
            TakerSide::Sell => "SELL",
            TakerSide::BuyEstimated => "BUY_ESTIMATED",
            TakerSide::SellEstimated => "SELL_ESTIMATED",
            TakerSide::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

impl TakerSide {
    /// Whether the buyer initiated the trade, measured or estimated.
    pub fn is_buy(&self) -> bool {
        matches!(self, TakerSide::Buy | TakerSide::BuyEstimated)
    }

    /// Whether the seller initiated the trade, measured or estimated.
    pub fn is_sell(&self) -> bool {
        matches!(self, TakerSide::Sell | TakerSide::SellEstimated)
    }
}

/// Icon of an asset or exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Exchange the icon belongs to.
    #[serde(default)]
    pub exchange_id: Option<String>,
    /// Asset the icon belongs to.
    #[serde(default)]
    pub asset_id: Option<String>,
    /// Icon image URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// A supported timeseries period such as `1MIN` or `1DAY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeseriesPeriod {
    /// Period identifier used in requests.
    #[serde(default)]
    pub period_id: Option<String>,
    /// Period length in seconds (0 for month-based periods).
    #[serde(default)]
    pub length_seconds: i64,
    /// Period length in months (0 for second-based periods).
    #[serde(default)]
    pub length_months: i64,
    /// Number of units in the period.
    #[serde(default)]
    pub unit_count: Option<i64>,
    /// Unit name such as `minute` or `day`.
    #[serde(default)]
    pub unit_name: Option<String>,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One price level of an order book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    /// Level price.
    pub price: Decimal,
    /// Volume resting at this price.
    pub size: Decimal,
    /// Order identifier, present on level 3 books only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Order book snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Symbol identifier.
    #[serde(default)]
    pub symbol_id: Option<String>,
    /// Time reported by the exchange.
    #[serde(with = "time::serde::rfc3339")]
    pub time_exchange: OffsetDateTime,
    /// Time CoinAPI received the snapshot.
    #[serde(with = "time::serde::rfc3339")]
    pub time_coinapi: OffsetDateTime,
    /// Ask levels, best first.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub asks: Vec<OrderBookLevel>,
    /// Bid levels, best first.
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub bids: Vec<OrderBookLevel>,
}

impl OrderBook {
    /// Lowest ask level.
    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    /// Highest bid level.
    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    /// Difference between the best ask and the best bid.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_taker_side_deserialize() {
        let side: TakerSide = serde_json::from_str(r#""BUY_ESTIMATED""#).unwrap();
        assert_eq!(side, TakerSide::BuyEstimated);
        assert!(side.is_buy());

        let side: TakerSide = serde_json::from_str(r#""SOMETHING_NEW""#).unwrap();
        assert_eq!(side, TakerSide::Unknown);
        assert!(!side.is_buy() && !side.is_sell());
    }

    #[test]
    fn test_taker_side_display() {
        assert_eq!(TakerSide::SellEstimated.to_string(), "SELL_ESTIMATED");
    }

    #[test]
    fn test_order_book_deserialize() {
        let json = r#"{
            "symbol_id": "BITSTAMP_SPOT_BTC_USD",
            "time_exchange": "2024-01-01T00:00:00.1234567Z",
            "time_coinapi": "2024-01-01T00:00:00.2000000Z",
            "asks": [{"price": 42001.5, "size": 0.5}],
            "bids": [{"price": 42000, "size": 1.25, "id": "abc"}]
        }"#;

        let book: OrderBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.symbol_id.as_deref(), Some("BITSTAMP_SPOT_BTC_USD"));
        assert_eq!(book.best_bid().unwrap().id.as_deref(), Some("abc"));
        assert_eq!(book.spread(), Some(Decimal::from_str("1.5").unwrap()));
    }

    #[test]
    fn test_order_book_spread_one_sided() {
        let json = r#"{
            "time_exchange": "2024-01-01T00:00:00Z",
            "time_coinapi": "2024-01-01T00:00:00Z",
            "asks": [{"price": 1, "size": 1}],
            "bids": null
        }"#;

        let book: OrderBook = serde_json::from_str(json).unwrap();
        assert!(book.bids.is_empty());
        assert_eq!(book.spread(), None);
    }

    #[test]
    fn test_timeseries_period_deserialize() {
        let json = r#"{
            "period_id": "1MIN",
            "length_seconds": 60,
            "length_months": 0,
            "unit_count": 1,
            "unit_name": "minute",
            "display_name": "1 Minute"
        }"#;
        let period: TimeseriesPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.period_id.as_deref(), Some("1MIN"));
        assert_eq!(period.length_seconds, 60);
    }
}
