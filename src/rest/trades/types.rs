//! Types for trade endpoints.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::request::Operation;
use crate::rest::endpoints::trades;
use crate::serialization::Field;
use crate::types::TakerSide;

/// Request for historical trades of one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct TradesHistoryRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Start of the range (inclusive).
    pub time_start: Option<OffsetDateTime>,
    /// End of the range (exclusive).
    pub time_end: Option<OffsetDateTime>,
    /// Maximum number of trades.
    pub limit: Option<u32>,
    /// Include exchange trade and order ids.
    pub include_id: Option<bool>,
}

impl TradesHistoryRequest {
    /// Create a history request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            time_start: None,
            time_end: None,
            limit: Some(100),
            include_id: Some(false),
        }
    }

    /// Set the start of the range.
    pub fn time_start(mut self, time: OffsetDateTime) -> Self {
        self.time_start = Some(time);
        self
    }

    /// Set the end of the range.
    pub fn time_end(mut self, time: OffsetDateTime) -> Self {
        self.time_end = Some(time);
        self
    }

    /// Set the maximum number of trades.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Include exchange trade and order ids.
    pub fn include_id(mut self, include: bool) -> Self {
        self.include_id = Some(include);
        self
    }
}

impl Operation for TradesHistoryRequest {
    type Output = Vec<Trade>;

    const OPERATION_ID: &'static str = "get_/v1/trades/{symbol_id}/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = trades::SYMBOL_HISTORY;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("time_start", self.time_start),
            Field::query("time_end", self.time_end),
            Field::query("limit", self.limit),
            Field::query("include_id", self.include_id),
        ]
    }
}

/// Request for the latest trades of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolLatestTradesRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Maximum number of trades.
    pub limit: Option<u32>,
    /// Include exchange trade and order ids.
    pub include_id: Option<bool>,
}

impl SymbolLatestTradesRequest {
    /// Create a request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            limit: Some(100),
            include_id: Some(false),
        }
    }

    /// Set the maximum number of trades.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Include exchange trade and order ids.
    pub fn include_id(mut self, include: bool) -> Self {
        self.include_id = Some(include);
        self
    }
}

impl Operation for SymbolLatestTradesRequest {
    type Output = Vec<Trade>;

    const OPERATION_ID: &'static str = "get_/v1/trades/{symbol_id}/latest";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = trades::SYMBOL_LATEST;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("limit", self.limit),
            Field::query("include_id", self.include_id),
        ]
    }
}

/// Request for the latest trades across all symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestTradesRequest {
    /// Comma or semicolon delimited symbol id prefixes.
    pub filter_symbol_id: Option<String>,
    /// Include exchange trade and order ids.
    pub include_id: Option<bool>,
    /// Maximum number of trades.
    pub limit: Option<u32>,
}

impl Default for LatestTradesRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl LatestTradesRequest {
    /// Create an unfiltered request.
    pub fn new() -> Self {
        Self {
            filter_symbol_id: None,
            include_id: Some(false),
            limit: Some(100),
        }
    }

    /// Restrict by symbol id prefix.
    pub fn filter_symbol_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_symbol_id = Some(filter.into());
        self
    }

    /// Include exchange trade and order ids.
    pub fn include_id(mut self, include: bool) -> Self {
        self.include_id = Some(include);
        self
    }

    /// Set the maximum number of trades.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for LatestTradesRequest {
    type Output = Vec<Trade>;

    const OPERATION_ID: &'static str = "get_/v1/trades/latest";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = trades::LATEST;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("filter_symbol_id", self.filter_symbol_id.as_deref()),
            Field::query("include_id", self.include_id),
            Field::query("limit", self.limit),
        ]
    }
}

/// Executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub time_exchange: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_coinapi: OffsetDateTime,
    /// Trade identifier assigned by CoinAPI.
    pub uuid: String,
    pub price: Decimal,
    pub size: Decimal,
    #[serde(default)]
    pub taker_side: Option<TakerSide>,
    /// Exchange trade id, present with `include_id`.
    #[serde(default)]
    pub id_trade: Option<String>,
    /// Maker order id, present with `include_id`.
    #[serde(default)]
    pub id_order_maker: Option<String>,
    /// Taker order id, present with `include_id`.
    #[serde(default)]
    pub id_order_taker: Option<String>,
}

impl Trade {
    /// Quote volume of the trade.
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{generate_url, get_query_params};
    use std::str::FromStr;

    #[test]
    fn test_history_request_fields() {
        let request = TradesHistoryRequest::new("BITSTAMP_SPOT_BTC_USD").include_id(true).limit(5);
        let fields = request.fields();

        let url =
            generate_url("https://rest.coinapi.io", TradesHistoryRequest::PATH, &fields).unwrap();
        assert_eq!(url, "https://rest.coinapi.io/v1/trades/BITSTAMP_SPOT_BTC_USD/history");
        assert_eq!(
            get_query_params(&fields).unwrap(),
            vec![
                ("limit".to_string(), "5".to_string()),
                ("include_id".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_trade_deserialize() {
        let json = r#"{
            "symbol_id": "BITSTAMP_SPOT_BTC_USD",
            "time_exchange": "2024-01-01T00:00:00.0000000Z",
            "time_coinapi": "2024-01-01T00:00:00.0123456Z",
            "uuid": "770C7A3B-7258-4441-8182-83740F3E2457",
            "price": 42000.5,
            "size": 0.2,
            "taker_side": "BUY_ESTIMATED"
        }"#;

        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.taker_side, Some(TakerSide::BuyEstimated));
        assert_eq!(trade.notional(), Decimal::from_str("8400.1").unwrap());
        assert!(trade.id_trade.is_none());
    }
}
