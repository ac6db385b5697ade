//! Types for exchange rate endpoints.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::request::Operation;
use crate::rest::endpoints::exchange_rates;
use crate::serialization::Field;
use crate::types::TimeseriesPeriod;

/// Request for the rate between two assets.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificRateRequest {
    /// Base asset, e.g. `BTC`.
    pub asset_id_base: String,
    /// Quote asset, e.g. `USD`.
    pub asset_id_quote: String,
    /// Point in time of the rate; the current rate when unset.
    pub time: Option<OffsetDateTime>,
}

impl SpecificRateRequest {
    /// Create a request for the current rate.
    pub fn new(asset_id_base: impl Into<String>, asset_id_quote: impl Into<String>) -> Self {
        Self {
            asset_id_base: asset_id_base.into(),
            asset_id_quote: asset_id_quote.into(),
            time: None,
        }
    }

    /// Ask for the rate at a given time.
    pub fn time(mut self, time: OffsetDateTime) -> Self {
        self.time = Some(time);
        self
    }
}

impl Operation for SpecificRateRequest {
    type Output = ExchangeRate;

    const OPERATION_ID: &'static str = "Get specific rate";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = exchange_rates::SPECIFIC_RATE;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("asset_id_base", self.asset_id_base.as_str()),
            Field::path("asset_id_quote", self.asset_id_quote.as_str()),
            Field::query("time", self.time),
        ]
    }
}

/// Request for the rates between one asset and all others.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRatesRequest {
    /// Base asset.
    pub asset_id_base: String,
    /// Comma or semicolon delimited quote assets, e.g. `USD;EUR`.
    pub filter_asset_id: Option<String>,
    /// Return `quote/base` instead of `base/quote` rates.
    pub invert: Option<bool>,
    /// Point in time of the rates; current rates when unset.
    pub time: Option<OffsetDateTime>,
}

impl BaseRatesRequest {
    /// Create a request for all current rates of `asset_id_base`.
    pub fn new(asset_id_base: impl Into<String>) -> Self {
        Self {
            asset_id_base: asset_id_base.into(),
            filter_asset_id: None,
            invert: Some(false),
            time: None,
        }
    }

    /// Restrict the quote assets.
    pub fn filter_asset_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_asset_id = Some(filter.into());
        self
    }

    /// Invert the returned rates.
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = Some(invert);
        self
    }

    /// Ask for the rates at a given time.
    pub fn time(mut self, time: OffsetDateTime) -> Self {
        self.time = Some(time);
        self
    }
}

impl Operation for BaseRatesRequest {
    type Output = ExchangeRates;

    const OPERATION_ID: &'static str = "get_/v1/exchangerate/{asset_id_base}";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = exchange_rates::BASE_RATES;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("asset_id_base", self.asset_id_base.as_str()),
            Field::query("filter_asset_id", self.filter_asset_id.as_deref()),
            Field::query("invert", self.invert),
            Field::query("time", self.time),
        ]
    }
}

/// Request for the supported exchange rate timeseries periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryPeriodsRequest;

impl Operation for HistoryPeriodsRequest {
    type Output = Vec<TimeseriesPeriod>;

    const OPERATION_ID: &'static str = "get_/v1/exchangerate/history/periods";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = exchange_rates::HISTORY_PERIODS;
}

/// Request for an exchange rate timeseries between two assets.
#[derive(Debug, Clone, PartialEq)]
pub struct PairHistoryRequest {
    /// Base asset.
    pub asset_id_base: String,
    /// Quote asset.
    pub asset_id_quote: String,
    /// Period identifier, e.g. `1HRS`.
    pub period_id: String,
    /// Start of the range (inclusive).
    pub time_start: Option<OffsetDateTime>,
    /// End of the range (exclusive).
    pub time_end: Option<OffsetDateTime>,
    /// Maximum number of items.
    pub limit: Option<u32>,
}

impl PairHistoryRequest {
    /// Create a timeseries request.
    pub fn new(
        asset_id_base: impl Into<String>,
        asset_id_quote: impl Into<String>,
        period_id: impl Into<String>,
    ) -> Self {
        Self {
            asset_id_base: asset_id_base.into(),
            asset_id_quote: asset_id_quote.into(),
            period_id: period_id.into(),
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

    /// Set the maximum number of items.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for PairHistoryRequest {
    type Output = Vec<ExchangeRatesTimeseriesItem>;

    const OPERATION_ID: &'static str =
        "get_/v1/exchangerate/{asset_id_base}/{asset_id_quote}/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = exchange_rates::PAIR_HISTORY;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("asset_id_base", self.asset_id_base.as_str()),
            Field::path("asset_id_quote", self.asset_id_quote.as_str()),
            Field::query("period_id", Some(self.period_id.as_str())),
            Field::query("time_start", self.time_start),
            Field::query("time_end", self.time_end),
            Field::query("limit", self.limit),
        ]
    }
}

/// VWAP-24H reference rate used to derive an exchange rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vwap24RefRate {
    /// Time of the reference.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Asset of the reference.
    #[serde(default)]
    pub asset: Option<String>,
    /// Reference rate.
    pub rate: Decimal,
    /// Traded volume behind the rate.
    pub volume: Decimal,
}

/// Exchange rate between two assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Time of the rate.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Base asset.
    #[serde(default)]
    pub asset_id_base: Option<String>,
    /// Quote asset.
    #[serde(default)]
    pub asset_id_quote: Option<String>,
    /// Price of one base unit in quote units.
    pub rate: Decimal,
    /// References on the base side.
    #[serde(default)]
    pub src_side_base: Option<Vec<Vwap24RefRate>>,
    /// References on the quote side.
    #[serde(default)]
    pub src_side_quote: Option<Vec<Vwap24RefRate>>,
}

/// One rate of an [`ExchangeRates`] collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRatesRate {
    /// Time of the rate.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Quote asset.
    #[serde(default)]
    pub asset_id_quote: Option<String>,
    /// Price of one base unit in quote units.
    pub rate: Decimal,
}

/// Rates between one base asset and many quote assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// Base asset.
    pub asset_id_base: String,
    /// Rates per quote asset.
    #[serde(default)]
    pub rates: Vec<ExchangeRatesRate>,
}

impl ExchangeRates {
    /// Look up the rate of a quote asset.
    pub fn rate_for(&self, asset_id_quote: &str) -> Option<Decimal> {
        self.rates
            .iter()
            .find(|rate| rate.asset_id_quote.as_deref() == Some(asset_id_quote))
            .map(|rate| rate.rate)
    }
}

/// One period of an exchange rate timeseries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRatesTimeseriesItem {
    /// Period start (inclusive).
    #[serde(with = "time::serde::rfc3339")]
    pub time_period_start: OffsetDateTime,
    /// Period end (exclusive).
    #[serde(with = "time::serde::rfc3339")]
    pub time_period_end: OffsetDateTime,
    /// Time of the first rate in the period.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_open: Option<OffsetDateTime>,
    /// Time of the last rate in the period.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_close: Option<OffsetDateTime>,
    /// First rate.
    #[serde(default)]
    pub rate_open: Option<Decimal>,
    /// Highest rate.
    #[serde(default)]
    pub rate_high: Option<Decimal>,
    /// Lowest rate.
    #[serde(default)]
    pub rate_low: Option<Decimal>,
    /// Last rate.
    #[serde(default)]
    pub rate_close: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{generate_url, get_query_params};
    use std::str::FromStr;
    use time::macros::datetime;

    #[test]
    fn test_specific_rate_fields() {
        let request =
            SpecificRateRequest::new("BTC", "USD").time(datetime!(2024-01-02 03:04:05 UTC));
        let fields = request.fields();

        let url =
            generate_url("https://rest.coinapi.io", SpecificRateRequest::PATH, &fields).unwrap();
        assert_eq!(url, "https://rest.coinapi.io/v1/exchangerate/BTC/USD");

        let query = get_query_params(&fields).unwrap();
        assert_eq!(query, vec![("time".to_string(), "2024-01-02T03:04:05Z".to_string())]);
    }

    #[test]
    fn test_base_rates_defaults() {
        let request = BaseRatesRequest::new("BTC");
        let query = get_query_params(&request.fields()).unwrap();
        assert_eq!(query, vec![("invert".to_string(), "false".to_string())]);
    }

    #[test]
    fn test_pair_history_defaults() {
        let request = PairHistoryRequest::new("BTC", "USD", "1HRS");
        let query = get_query_params(&request.fields()).unwrap();
        assert_eq!(
            query,
            vec![
                ("period_id".to_string(), "1HRS".to_string()),
                ("limit".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_exchange_rate_deserialize() {
        let json = r#"{
            "time": "2024-01-01T12:00:00.0000000Z",
            "asset_id_base": "BTC",
            "asset_id_quote": "USD",
            "rate": 42000.25
        }"#;

        let rate: ExchangeRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.asset_id_base.as_deref(), Some("BTC"));
        assert_eq!(rate.rate, Decimal::from_str("42000.25").unwrap());
        assert!(rate.src_side_base.is_none());
    }

    #[test]
    fn test_exchange_rate_keeps_all_digits() {
        let json = r#"{
            "time": "2024-01-01T12:00:00Z",
            "asset_id_base": "BTC",
            "asset_id_quote": "USD",
            "rate": 42123.123456789012345678,
            "src_side_base": [
                {
                    "time": "2024-01-01T12:00:00Z",
                    "asset": "BTC",
                    "rate": 0.000023739999999999999,
                    "volume": 1
                }
            ]
        }"#;

        let rate: ExchangeRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.rate, Decimal::from_str("42123.123456789012345678").unwrap());
        assert_eq!(rate.rate.to_string(), "42123.123456789012345678");

        let reference = &rate.src_side_base.unwrap()[0];
        assert_eq!(reference.rate, Decimal::from_str("0.000023739999999999999").unwrap());
    }

    #[test]
    fn test_exchange_rates_lookup() {
        let json = r#"{
            "asset_id_base": "BTC",
            "rates": [
                {"time": "2024-01-01T00:00:00Z", "asset_id_quote": "USD", "rate": 42000},
                {"time": "2024-01-01T00:00:00Z", "asset_id_quote": "EUR", "rate": 38000.5}
            ]
        }"#;

        let rates: ExchangeRates = serde_json::from_str(json).unwrap();
        assert_eq!(rates.rate_for("EUR"), Some(Decimal::from_str("38000.5").unwrap()));
        assert_eq!(rates.rate_for("GBP"), None);
    }
}
