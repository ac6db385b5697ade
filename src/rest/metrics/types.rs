//! Types for metrics endpoints.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::request::Operation;
use crate::rest::endpoints::metrics;
use crate::serialization::Field;

/// Time range and paging shared by the metric history requests.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRange {
    /// Start of the range (inclusive).
    pub time_start: Option<OffsetDateTime>,
    /// End of the range (exclusive).
    pub time_end: Option<OffsetDateTime>,
    /// Time format of the response, e.g. `unix_sec`.
    pub time_format: Option<String>,
    /// Aggregation period, e.g. `1DAY`.
    pub period_id: Option<String>,
    /// Maximum number of items.
    pub limit: Option<u32>,
}

impl Default for HistoryRange {
    fn default() -> Self {
        Self {
            time_start: None,
            time_end: None,
            time_format: None,
            period_id: None,
            limit: Some(100),
        }
    }
}

impl HistoryRange {
    /// Create a range with the default limit.
    pub fn new() -> Self {
        Self::default()
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

    /// Set the response time format.
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    /// Set the aggregation period.
    pub fn period_id(mut self, period_id: impl Into<String>) -> Self {
        self.period_id = Some(period_id.into());
        self
    }

    /// Set the maximum number of items.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("time_start", self.time_start),
            Field::query("time_end", self.time_end),
            Field::query("time_format", self.time_format.as_deref()),
            Field::query("period_id", self.period_id.as_deref()),
            Field::query("limit", self.limit),
        ]
    }
}

/// Request for all metric definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsListingRequest;

impl Operation for MetricsListingRequest {
    type Output = Vec<Metric>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/listing";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::LISTING;
}

/// Request for the metrics available for an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeMetricsListingRequest {
    /// Exchange id.
    pub exchange_id: String,
    /// Restrict to one metric.
    pub metric_id: Option<String>,
}

impl ExchangeMetricsListingRequest {
    /// Create a listing request for `exchange_id`.
    pub fn new(exchange_id: impl Into<String>) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            metric_id: None,
        }
    }

    /// Restrict to one metric.
    pub fn metric_id(mut self, metric_id: impl Into<String>) -> Self {
        self.metric_id = Some(metric_id.into());
        self
    }
}

impl Operation for ExchangeMetricsListingRequest {
    type Output = Vec<ListingItem>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/exchange/listing";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::EXCHANGE_LISTING;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("exchange_id", Some(self.exchange_id.as_str())),
            Field::query("metric_id", self.metric_id.as_deref()),
        ]
    }
}

/// Request for the current metrics of an exchange.
///
/// Takes the same parameters as [`ExchangeMetricsListingRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeMetricsCurrentRequest(pub ExchangeMetricsListingRequest);

impl ExchangeMetricsCurrentRequest {
    /// Create a request for the current metrics of `exchange_id`.
    pub fn new(exchange_id: impl Into<String>) -> Self {
        Self(ExchangeMetricsListingRequest::new(exchange_id))
    }

    /// Restrict to one metric.
    pub fn metric_id(self, metric_id: impl Into<String>) -> Self {
        Self(self.0.metric_id(metric_id))
    }
}

impl Operation for ExchangeMetricsCurrentRequest {
    type Output = Vec<GeneralData>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/exchange/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::EXCHANGE_CURRENT;

    fn fields(&self) -> Vec<Field> {
        self.0.fields()
    }
}

/// Request for the history of one exchange metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeMetricsHistoryRequest {
    /// Metric id.
    pub metric_id: String,
    /// Exchange id.
    pub exchange_id: String,
    /// Time range and paging.
    pub range: HistoryRange,
}

impl ExchangeMetricsHistoryRequest {
    /// Create a history request.
    pub fn new(metric_id: impl Into<String>, exchange_id: impl Into<String>) -> Self {
        Self {
            metric_id: metric_id.into(),
            exchange_id: exchange_id.into(),
            range: HistoryRange::new(),
        }
    }

    /// Set the time range and paging.
    pub fn range(mut self, range: HistoryRange) -> Self {
        self.range = range;
        self
    }
}

impl Operation for ExchangeMetricsHistoryRequest {
    type Output = Vec<MetricData>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/exchange/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::EXCHANGE_HISTORY;

    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::query("metric_id", Some(self.metric_id.as_str())),
            Field::query("exchange_id", Some(self.exchange_id.as_str())),
        ];
        fields.extend(self.range.fields());
        fields
    }
}

/// Request for the metrics available for symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolMetricsListingRequest {
    pub metric_id: Option<String>,
    pub exchange_id: Option<String>,
    pub symbol_id: Option<String>,
}

impl SymbolMetricsListingRequest {
    /// Create an unfiltered listing request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one metric.
    pub fn metric_id(mut self, metric_id: impl Into<String>) -> Self {
        self.metric_id = Some(metric_id.into());
        self
    }

    /// Restrict to one exchange.
    pub fn exchange_id(mut self, exchange_id: impl Into<String>) -> Self {
        self.exchange_id = Some(exchange_id.into());
        self
    }

    /// Restrict to one symbol.
    pub fn symbol_id(mut self, symbol_id: impl Into<String>) -> Self {
        self.symbol_id = Some(symbol_id.into());
        self
    }
}

impl Operation for SymbolMetricsListingRequest {
    type Output = Vec<ListingItem>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/symbol/listing";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::SYMBOL_LISTING;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("metric_id", self.metric_id.as_deref()),
            Field::query("exchange_id", self.exchange_id.as_deref()),
            Field::query("symbol_id", self.symbol_id.as_deref()),
        ]
    }
}

/// Request for current symbol metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolMetricsCurrentRequest {
    pub metric_id: Option<String>,
    pub symbol_id: Option<String>,
    pub exchange_id: Option<String>,
}

impl SymbolMetricsCurrentRequest {
    /// Create an unfiltered request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one metric.
    pub fn metric_id(mut self, metric_id: impl Into<String>) -> Self {
        self.metric_id = Some(metric_id.into());
        self
    }

    /// Restrict to one symbol.
    pub fn symbol_id(mut self, symbol_id: impl Into<String>) -> Self {
        self.symbol_id = Some(symbol_id.into());
        self
    }

    /// Restrict to one exchange.
    pub fn exchange_id(mut self, exchange_id: impl Into<String>) -> Self {
        self.exchange_id = Some(exchange_id.into());
        self
    }
}

impl Operation for SymbolMetricsCurrentRequest {
    type Output = Vec<GeneralData>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/symbol/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::SYMBOL_CURRENT;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("metric_id", self.metric_id.as_deref()),
            Field::query("symbol_id", self.symbol_id.as_deref()),
            Field::query("exchange_id", self.exchange_id.as_deref()),
        ]
    }
}

/// Request for the history of one symbol metric.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolMetricsHistoryRequest {
    /// Metric id.
    pub metric_id: String,
    /// Symbol id.
    pub symbol_id: String,
    /// Time range and paging.
    pub range: HistoryRange,
}

impl SymbolMetricsHistoryRequest {
    /// Create a history request.
    pub fn new(metric_id: impl Into<String>, symbol_id: impl Into<String>) -> Self {
        Self {
            metric_id: metric_id.into(),
            symbol_id: symbol_id.into(),
            range: HistoryRange::new(),
        }
    }

    /// Set the time range and paging.
    pub fn range(mut self, range: HistoryRange) -> Self {
        self.range = range;
        self
    }
}

impl Operation for SymbolMetricsHistoryRequest {
    type Output = Vec<MetricData>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/symbol/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::SYMBOL_HISTORY;

    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::query("metric_id", Some(self.metric_id.as_str())),
            Field::query("symbol_id", Some(self.symbol_id.as_str())),
        ];
        fields.extend(self.range.fields());
        fields
    }
}

/// Request for the metrics available for assets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMetricsListingRequest {
    pub metric_id: Option<String>,
    pub exchange_id: Option<String>,
    /// Blockchain id.
    pub chain_id: Option<String>,
    /// Network id.
    pub network_id: Option<String>,
    pub asset_id: Option<String>,
    /// Asset id as named by the data source.
    pub asset_id_external: Option<String>,
}

impl AssetMetricsListingRequest {
    /// Create an unfiltered listing request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one metric.
    pub fn metric_id(mut self, metric_id: impl Into<String>) -> Self {
        self.metric_id = Some(metric_id.into());
        self
    }

    /// Restrict to one exchange.
    pub fn exchange_id(mut self, exchange_id: impl Into<String>) -> Self {
        self.exchange_id = Some(exchange_id.into());
        self
    }

    /// Restrict to one chain.
    pub fn chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    /// Restrict to one network.
    pub fn network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    /// Restrict to one asset.
    pub fn asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }

    /// Restrict to one external asset id.
    pub fn asset_id_external(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id_external = Some(asset_id.into());
        self
    }
}

impl Operation for AssetMetricsListingRequest {
    type Output = Vec<ListingItem>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/asset/listing";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::ASSET_LISTING;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("metric_id", self.metric_id.as_deref()),
            Field::query("exchange_id", self.exchange_id.as_deref()),
            Field::query("chain_id", self.chain_id.as_deref()),
            Field::query("network_id", self.network_id.as_deref()),
            Field::query("asset_id", self.asset_id.as_deref()),
            Field::query("asset_id_external", self.asset_id_external.as_deref()),
        ]
    }
}

/// Request for current asset metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMetricsCurrentRequest {
    pub metric_id: Option<String>,
    pub asset_id: Option<String>,
    pub asset_id_external: Option<String>,
    pub exchange_id: Option<String>,
}

impl AssetMetricsCurrentRequest {
    /// Create an unfiltered request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one metric.
    pub fn metric_id(mut self, metric_id: impl Into<String>) -> Self {
        self.metric_id = Some(metric_id.into());
        self
    }

    /// Restrict to one asset.
    pub fn asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }

    /// Restrict to one external asset id.
    pub fn asset_id_external(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id_external = Some(asset_id.into());
        self
    }

    /// Restrict to one exchange.
    pub fn exchange_id(mut self, exchange_id: impl Into<String>) -> Self {
        self.exchange_id = Some(exchange_id.into());
        self
    }
}

impl Operation for AssetMetricsCurrentRequest {
    type Output = Vec<GeneralData>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/asset/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::ASSET_CURRENT;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("metric_id", self.metric_id.as_deref()),
            Field::query("asset_id", self.asset_id.as_deref()),
            Field::query("asset_id_external", self.asset_id_external.as_deref()),
            Field::query("exchange_id", self.exchange_id.as_deref()),
        ]
    }
}

/// Request for the history of one asset metric on an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetMetricsHistoryRequest {
    /// Metric id.
    pub metric_id: String,
    /// Exchange id.
    pub exchange_id: String,
    pub asset_id: Option<String>,
    pub asset_id_external: Option<String>,
    /// Time range and paging.
    pub range: HistoryRange,
}

impl AssetMetricsHistoryRequest {
    /// Create a history request.
    pub fn new(metric_id: impl Into<String>, exchange_id: impl Into<String>) -> Self {
        Self {
            metric_id: metric_id.into(),
            exchange_id: exchange_id.into(),
            asset_id: None,
            asset_id_external: None,
            range: HistoryRange::new(),
        }
    }

    /// Restrict to one asset.
    pub fn asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }

    /// Restrict to one external asset id.
    pub fn asset_id_external(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id_external = Some(asset_id.into());
        self
    }

    /// Set the time range and paging.
    pub fn range(mut self, range: HistoryRange) -> Self {
        self.range = range;
        self
    }
}

impl Operation for AssetMetricsHistoryRequest {
    type Output = Vec<MetricData>;

    const OPERATION_ID: &'static str = "get_/v1/metrics/asset/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metrics::ASSET_HISTORY;

    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::query("metric_id", Some(self.metric_id.as_str())),
            Field::query("exchange_id", Some(self.exchange_id.as_str())),
            Field::query("asset_id", self.asset_id.as_deref()),
            Field::query("asset_id_external", self.asset_id_external.as_deref()),
        ];
        fields.extend(self.range.fields());
        fields
    }
}

/// Metric definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub metric_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Availability of a metric for an exchange, symbol or asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    #[serde(default)]
    pub metric_id: Option<String>,
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(default)]
    pub symbol_id_external: Option<String>,
    #[serde(default)]
    pub exchange_id: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub asset_id_external: Option<String>,
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
}

/// Current metric value.
///
/// A value is carried in exactly one of `value_decimal`, `value_text` or
/// `value_time`, depending on the metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralData {
    /// Time the value applies to.
    #[serde(with = "time::serde::rfc3339")]
    pub entry_time: OffsetDateTime,
    /// Time CoinAPI received the value.
    #[serde(with = "time::serde::rfc3339")]
    pub recv_time: OffsetDateTime,
    #[serde(default)]
    pub exchange_id: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(default)]
    pub metric_id: Option<String>,
    #[serde(default)]
    pub value_decimal: Option<Decimal>,
    #[serde(default)]
    pub value_text: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub value_time: Option<OffsetDateTime>,
}

/// Historical metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricData {
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub value: Decimal,
}
