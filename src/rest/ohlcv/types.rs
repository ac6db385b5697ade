//! Types for OHLCV endpoints.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::request::Operation;
use crate::rest::endpoints::ohlcv;
use crate::serialization::Field;
use crate::types::TimeseriesPeriod;

/// Request for the supported OHLCV periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OhlcvPeriodsRequest;

impl Operation for OhlcvPeriodsRequest {
    type Output = Vec<TimeseriesPeriod>;

    const OPERATION_ID: &'static str = "get_/v1/ohlcv/periods";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = ohlcv::PERIODS;
}

/// Request for historical OHLCV data of one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvHistoryRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Period identifier, e.g. `1MIN`.
    pub period_id: Option<String>,
    /// Start of the range (inclusive).
    pub time_start: Option<OffsetDateTime>,
    /// End of the range (exclusive).
    pub time_end: Option<OffsetDateTime>,
    /// Maximum number of periods.
    pub limit: Option<u32>,
    /// Return periods without trades.
    pub include_empty_items: Option<bool>,
}

impl OhlcvHistoryRequest {
    /// Create a history request for `symbol_id` in `period_id` buckets.
    pub fn new(symbol_id: impl Into<String>, period_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            period_id: Some(period_id.into()),
            time_start: None,
            time_end: None,
            limit: Some(100),
            include_empty_items: Some(false),
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

    /// Set the maximum number of periods.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return periods without trades.
    pub fn include_empty_items(mut self, include: bool) -> Self {
        self.include_empty_items = Some(include);
        self
    }
}

impl Operation for OhlcvHistoryRequest {
    type Output = Vec<TimeseriesItem>;

    const OPERATION_ID: &'static str = "get_/v1/ohlcv/{symbol_id}/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = ohlcv::SYMBOL_HISTORY;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("period_id", self.period_id.as_deref()),
            Field::query("time_start", self.time_start),
            Field::query("time_end", self.time_end),
            Field::query("limit", self.limit),
            Field::query("include_empty_items", self.include_empty_items),
        ]
    }
}

/// Request for historical OHLCV data of every symbol of an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOhlcvHistoryRequest {
    /// Exchange id.
    pub exchange_id: String,
    /// Period identifier.
    pub period_id: String,
    /// Start of the range (inclusive).
    pub time_start: OffsetDateTime,
    /// End of the range (exclusive).
    pub time_end: OffsetDateTime,
}

impl ExchangeOhlcvHistoryRequest {
    /// Create a request covering `[time_start, time_end)`.
    pub fn new(
        exchange_id: impl Into<String>,
        period_id: impl Into<String>,
        time_start: OffsetDateTime,
        time_end: OffsetDateTime,
    ) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            period_id: period_id.into(),
            time_start,
            time_end,
        }
    }
}

impl Operation for ExchangeOhlcvHistoryRequest {
    type Output = Vec<ExchangeTimeseriesItem>;

    const OPERATION_ID: &'static str = "get_/v1/ohlcv/exchanges/{exchange_id}/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = ohlcv::EXCHANGE_HISTORY;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("exchange_id", self.exchange_id.as_str()),
            Field::query("period_id", Some(self.period_id.as_str())),
            Field::query("time_start", Some(self.time_start)),
            Field::query("time_end", Some(self.time_end)),
        ]
    }
}

/// Request for the latest OHLCV periods of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhlcvLatestRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Period identifier.
    pub period_id: Option<String>,
    /// Maximum number of periods.
    pub limit: Option<u32>,
    /// Return periods without trades.
    pub include_empty_items: Option<bool>,
}

impl OhlcvLatestRequest {
    /// Create a request for the latest `period_id` periods of `symbol_id`.
    pub fn new(symbol_id: impl Into<String>, period_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            period_id: Some(period_id.into()),
            limit: Some(100),
            include_empty_items: Some(false),
        }
    }

    /// Set the maximum number of periods.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return periods without trades.
    pub fn include_empty_items(mut self, include: bool) -> Self {
        self.include_empty_items = Some(include);
        self
    }
}

impl Operation for OhlcvLatestRequest {
    type Output = Vec<TimeseriesItem>;

    const OPERATION_ID: &'static str = "get_/v1/ohlcv/{symbol_id}/latest";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = ohlcv::SYMBOL_LATEST;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("period_id", self.period_id.as_deref()),
            Field::query("limit", self.limit),
            Field::query("include_empty_items", self.include_empty_items),
        ]
    }
}

/// One OHLCV period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesItem {
    /// Period start (inclusive).
    #[serde(with = "time::serde::rfc3339")]
    pub time_period_start: OffsetDateTime,
    /// Period end (exclusive).
    #[serde(with = "time::serde::rfc3339")]
    pub time_period_end: OffsetDateTime,
    /// Time of the first trade.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_open: Option<OffsetDateTime>,
    /// Time of the last trade.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_close: Option<OffsetDateTime>,
    #[serde(default)]
    pub price_open: Option<Decimal>,
    #[serde(default)]
    pub price_high: Option<Decimal>,
    #[serde(default)]
    pub price_low: Option<Decimal>,
    #[serde(default)]
    pub price_close: Option<Decimal>,
    /// Cumulative base volume.
    pub volume_traded: Decimal,
    /// Number of trades.
    pub trades_count: i64,
}

/// One OHLCV period of an exchange-wide history, tagged with its symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeTimeseriesItem {
    /// Symbol id.
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub time_period_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_period_end: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_open: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_close: Option<OffsetDateTime>,
    #[serde(default)]
    pub price_open: Option<Decimal>,
    #[serde(default)]
    pub price_high: Option<Decimal>,
    #[serde(default)]
    pub price_low: Option<Decimal>,
    #[serde(default)]
    pub price_close: Option<Decimal>,
    pub volume_traded: Decimal,
    pub trades_count: i64,
}

impl From<ExchangeTimeseriesItem> for TimeseriesItem {
    fn from(item: ExchangeTimeseriesItem) -> Self {
        Self {
            time_period_start: item.time_period_start,
            time_period_end: item.time_period_end,
            time_open: item.time_open,
            time_close: item.time_close,
            price_open: item.price_open,
            price_high: item.price_high,
            price_low: item.price_low,
            price_close: item.price_close,
            volume_traded: item.volume_traded,
            trades_count: item.trades_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{generate_url, get_query_params};
    use std::str::FromStr;
    use time::macros::datetime;

    #[test]
    fn test_history_request_defaults() {
        let request = OhlcvHistoryRequest::new("BITSTAMP_SPOT_BTC_USD", "1HRS");
        let fields = request.fields();

        let url =
            generate_url("https://rest.coinapi.io", OhlcvHistoryRequest::PATH, &fields).unwrap();
        assert_eq!(url, "https://rest.coinapi.io/v1/ohlcv/BITSTAMP_SPOT_BTC_USD/history");
        assert_eq!(
            get_query_params(&fields).unwrap(),
            vec![
                ("period_id".to_string(), "1HRS".to_string()),
                ("limit".to_string(), "100".to_string()),
                ("include_empty_items".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_exchange_history_requires_range() {
        let request = ExchangeOhlcvHistoryRequest::new(
            "BINANCE",
            "1DAY",
            datetime!(2024-01-01 00:00 UTC),
            datetime!(2024-01-02 00:00 UTC),
        );

        let query = get_query_params(&request.fields()).unwrap();
        assert_eq!(query.len(), 3);
        assert_eq!(query[2], ("time_end".to_string(), "2024-01-02T00:00:00Z".to_string()));
    }

    #[test]
    fn test_exchange_timeseries_item_deserialize() {
        let json = r#"{
            "symbol_id": "BINANCE_SPOT_ETH_BTC",
            "time_period_start": "2024-01-01T00:00:00.0000000Z",
            "time_period_end": "2024-01-02T00:00:00.0000000Z",
            "price_open": 0.0512,
            "price_close": 0.0518,
            "volume_traded": 1520.25,
            "trades_count": 42
        }"#;

        let item: ExchangeTimeseriesItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.symbol_id.as_deref(), Some("BINANCE_SPOT_ETH_BTC"));
        assert_eq!(item.trades_count, 42);

        let period = TimeseriesItem::from(item);
        assert_eq!(period.price_close, Some(Decimal::from_str("0.0518").unwrap()));
        assert_eq!(period.volume_traded, Decimal::from_str("1520.25").unwrap());
        assert!(period.time_open.is_none());
    }
}
