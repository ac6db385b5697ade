//! Types for quote endpoints.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::request::Operation;
use crate::rest::endpoints::quotes;
use crate::serialization::Field;
use crate::types::TakerSide;

/// Request for historical quotes of one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotesHistoryRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Start of the range (inclusive).
    pub time_start: Option<OffsetDateTime>,
    /// End of the range (exclusive).
    pub time_end: Option<OffsetDateTime>,
    /// Maximum number of quotes.
    pub limit: Option<u32>,
}

impl QuotesHistoryRequest {
    /// Create a history request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            time_start: None,
            time_end: None,
            limit: Some(100),
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

    /// Set the maximum number of quotes.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for QuotesHistoryRequest {
    type Output = Vec<Quote>;

    const OPERATION_ID: &'static str = "get_/v1/quotes/{symbol_id}/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = quotes::SYMBOL_HISTORY;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("time_start", self.time_start),
            Field::query("time_end", self.time_end),
            Field::query("limit", self.limit),
        ]
    }
}

/// Request for the current quotes of all symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentQuotesRequest {
    /// Comma or semicolon delimited symbol id prefixes.
    pub filter_symbol_id: Option<String>,
}

impl CurrentQuotesRequest {
    /// Create an unfiltered request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict by symbol id prefix.
    pub fn filter_symbol_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_symbol_id = Some(filter.into());
        self
    }
}

impl Operation for CurrentQuotesRequest {
    type Output = Vec<QuoteTrade>;

    const OPERATION_ID: &'static str = "get_/v1/quotes/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = quotes::CURRENT;

    fn fields(&self) -> Vec<Field> {
        vec![Field::query("filter_symbol_id", self.filter_symbol_id.as_deref())]
    }
}

/// Request for the current quote of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentQuoteRequest {
    /// Symbol id.
    pub symbol_id: String,
}

impl CurrentQuoteRequest {
    /// Create a request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
        }
    }
}

impl Operation for CurrentQuoteRequest {
    type Output = QuoteTrade;

    const OPERATION_ID: &'static str = "get_/v1/quotes/{symbol_id}/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = quotes::SYMBOL_CURRENT;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("symbol_id", self.symbol_id.as_str())]
    }
}

/// Request for the latest quotes of all symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestQuotesRequest {
    /// Comma or semicolon delimited symbol id prefixes.
    pub filter_symbol_id: Option<String>,
    /// Maximum number of quotes.
    pub limit: Option<u32>,
}

impl Default for LatestQuotesRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl LatestQuotesRequest {
    /// Create an unfiltered request.
    pub fn new() -> Self {
        Self {
            filter_symbol_id: None,
            limit: Some(100),
        }
    }

    /// Restrict by symbol id prefix.
    pub fn filter_symbol_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_symbol_id = Some(filter.into());
        self
    }

    /// Set the maximum number of quotes.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for LatestQuotesRequest {
    type Output = Vec<Quote>;

    const OPERATION_ID: &'static str = "get_/v1/quotes/latest";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = quotes::LATEST;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("filter_symbol_id", self.filter_symbol_id.as_deref()),
            Field::query("limit", self.limit),
        ]
    }
}

/// Request for the latest quotes of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolLatestQuotesRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Maximum number of quotes.
    pub limit: Option<u32>,
}

impl SymbolLatestQuotesRequest {
    /// Create a request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            limit: Some(100),
        }
    }

    /// Set the maximum number of quotes.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for SymbolLatestQuotesRequest {
    type Output = Vec<Quote>;

    const OPERATION_ID: &'static str = "get_/v1/quotes/{symbol_id}/latest";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = quotes::SYMBOL_LATEST;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("limit", self.limit),
        ]
    }
}

/// Best bid and offer update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub time_exchange: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_coinapi: OffsetDateTime,
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    #[serde(default)]
    pub ask_size: Option<Decimal>,
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    #[serde(default)]
    pub bid_size: Option<Decimal>,
}

impl Quote {
    /// Mid price between the best bid and ask.
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.ask_price? + self.bid_price?) / Decimal::TWO)
    }
}

/// Last trade attached to a current quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastTrade {
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
}

/// Current quote together with the last trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteTrade {
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub time_exchange: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_coinapi: OffsetDateTime,
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    #[serde(default)]
    pub ask_size: Option<Decimal>,
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    #[serde(default)]
    pub bid_size: Option<Decimal>,
    /// Latest trade, if any.
    #[serde(default)]
    pub last_trade: Option<LastTrade>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::get_query_params;
    use std::str::FromStr;

    #[test]
    fn test_latest_quotes_defaults() {
        assert_eq!(
            get_query_params(&LatestQuotesRequest::new().fields()).unwrap(),
            vec![("limit".to_string(), "100".to_string())]
        );
    }

    #[test]
    fn test_quote_mid_price() {
        let json = r#"{
            "symbol_id": "BITSTAMP_SPOT_BTC_USD",
            "time_exchange": "2024-01-01T00:00:00Z",
            "time_coinapi": "2024-01-01T00:00:00Z",
            "ask_price": 42001,
            "ask_size": 0.1,
            "bid_price": 42000,
            "bid_size": 0.2
        }"#;

        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.mid_price(), Some(Decimal::from_str("42000.5").unwrap()));
    }

    #[test]
    fn test_quote_trade_with_last_trade() {
        let json = r#"{
            "symbol_id": "BITSTAMP_SPOT_BTC_USD",
            "time_exchange": "2024-01-01T00:00:00Z",
            "time_coinapi": "2024-01-01T00:00:00Z",
            "ask_price": 42001,
            "last_trade": {
                "time_exchange": "2024-01-01T00:00:00Z",
                "time_coinapi": "2024-01-01T00:00:00Z",
                "uuid": "770C7A3B-7258-4441-8182-83740F3E2457",
                "price": 42000.5,
                "size": 0.01,
                "taker_side": "SELL"
            }
        }"#;

        let quote: QuoteTrade = serde_json::from_str(json).unwrap();
        let trade = quote.last_trade.unwrap();
        assert_eq!(trade.taker_side, Some(TakerSide::Sell));
        assert!(quote.bid_price.is_none());
    }
}
