//! Types for metadata endpoints.

use std::collections::HashMap;

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::request::Operation;
use crate::rest::endpoints::metadata;
use crate::serialization::Field;
use crate::types::Icon;
use crate::types::serde_helpers::int_bool;

/// Request for the list of assets.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetsRequest {
    /// Comma or semicolon delimited asset ids, e.g. `BTC;ETH`.
    pub filter_asset_id: Option<String>,
    /// Include supply figures.
    pub include_supply: Option<bool>,
}

impl Default for AssetsRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetsRequest {
    /// Create a request for all assets.
    pub fn new() -> Self {
        Self {
            filter_asset_id: None,
            include_supply: Some(false),
        }
    }

    /// Restrict the listed assets.
    pub fn filter_asset_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_asset_id = Some(filter.into());
        self
    }

    /// Include supply figures.
    pub fn include_supply(mut self, include: bool) -> Self {
        self.include_supply = Some(include);
        self
    }
}

impl Operation for AssetsRequest {
    type Output = Vec<Asset>;

    const OPERATION_ID: &'static str = "get_/v1/assets";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::ASSETS;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("filter_asset_id", self.filter_asset_id.as_deref()),
            Field::query("include_supply", self.include_supply),
        ]
    }
}

/// Request for a single asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    /// Asset id.
    pub asset_id: String,
}

impl AssetRequest {
    /// Create a request for `asset_id`.
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
        }
    }
}

impl Operation for AssetRequest {
    type Output = Vec<Asset>;

    const OPERATION_ID: &'static str = "get_/v1/assets/{asset_id}";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::ASSET;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("asset_id", self.asset_id.as_str())]
    }
}

/// Request for asset icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetIconsRequest {
    /// Icon width and height in pixels.
    pub size: u32,
}

impl AssetIconsRequest {
    /// Create a request for icons of the given size.
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl Operation for AssetIconsRequest {
    type Output = Vec<Icon>;

    const OPERATION_ID: &'static str = "get_/v1/assets/icons/{size}";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::ASSET_ICONS;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("size", self.size)]
    }
}

/// Request for the list of exchanges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangesRequest {
    /// Comma or semicolon delimited exchange ids, e.g. `BINANCE;BITSTAMP`.
    pub filter_exchange_id: Option<String>,
}

impl ExchangesRequest {
    /// Create a request for all exchanges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the listed exchanges.
    pub fn filter_exchange_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_exchange_id = Some(filter.into());
        self
    }
}

impl Operation for ExchangesRequest {
    type Output = Vec<Exchange>;

    const OPERATION_ID: &'static str = "get_/v1/exchanges";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::EXCHANGES;

    fn fields(&self) -> Vec<Field> {
        vec![Field::query("filter_exchange_id", self.filter_exchange_id.as_deref())]
    }
}

/// Request for a single exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    /// Exchange id.
    pub exchange_id: String,
}

impl ExchangeRequest {
    /// Create a request for `exchange_id`.
    pub fn new(exchange_id: impl Into<String>) -> Self {
        Self {
            exchange_id: exchange_id.into(),
        }
    }
}

impl Operation for ExchangeRequest {
    type Output = Vec<Exchange>;

    const OPERATION_ID: &'static str = "get_/v1/exchanges/{exchange_id}";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::EXCHANGE;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("exchange_id", self.exchange_id.as_str())]
    }
}

/// Request for exchange icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeIconsRequest {
    /// Icon width and height in pixels.
    pub size: u32,
}

impl ExchangeIconsRequest {
    /// Create a request for icons of the given size.
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl Operation for ExchangeIconsRequest {
    type Output = Vec<Icon>;

    const OPERATION_ID: &'static str = "get_/v1/exchanges/icons/{size}";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::EXCHANGE_ICONS;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("size", self.size)]
    }
}

/// Request for the metadata root document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetadataRequest;

impl Operation for MetadataRequest {
    type Output = serde_json::Value;

    const OPERATION_ID: &'static str = "get_/v1/metadata";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::METADATA;
}

/// Request for the list of symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolsRequest {
    /// Comma or semicolon delimited symbol id prefixes.
    pub filter_symbol_id: Option<String>,
    /// Comma or semicolon delimited exchange ids.
    pub filter_exchange_id: Option<String>,
    /// Comma or semicolon delimited asset ids.
    pub filter_asset_id: Option<String>,
}

impl SymbolsRequest {
    /// Create a request for all symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict by symbol id prefix.
    pub fn filter_symbol_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_symbol_id = Some(filter.into());
        self
    }

    /// Restrict by exchange.
    pub fn filter_exchange_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_exchange_id = Some(filter.into());
        self
    }

    /// Restrict by asset.
    pub fn filter_asset_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_asset_id = Some(filter.into());
        self
    }
}

impl Operation for SymbolsRequest {
    type Output = Vec<Symbol>;

    const OPERATION_ID: &'static str = "get_/v1/symbols";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::SYMBOLS;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("filter_symbol_id", self.filter_symbol_id.as_deref()),
            Field::query("filter_exchange_id", self.filter_exchange_id.as_deref()),
            Field::query("filter_asset_id", self.filter_asset_id.as_deref()),
        ]
    }
}

/// Request for the symbols of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeSymbolsRequest {
    /// Exchange id.
    pub exchange_id: String,
    /// Comma or semicolon delimited symbol id prefixes.
    pub filter_symbol_id: Option<String>,
    /// Comma or semicolon delimited asset ids.
    pub filter_asset_id: Option<String>,
}

impl ExchangeSymbolsRequest {
    /// Create a request for all symbols of `exchange_id`.
    pub fn new(exchange_id: impl Into<String>) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            filter_symbol_id: None,
            filter_asset_id: None,
        }
    }

    /// Restrict by symbol id prefix.
    pub fn filter_symbol_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_symbol_id = Some(filter.into());
        self
    }

    /// Restrict by asset.
    pub fn filter_asset_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_asset_id = Some(filter.into());
        self
    }
}

impl Operation for ExchangeSymbolsRequest {
    type Output = Vec<Symbol>;

    const OPERATION_ID: &'static str = "get_/v1/symbols/{exchange_id}";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::EXCHANGE_SYMBOLS;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("exchange_id", self.exchange_id.as_str()),
            Field::query("filter_symbol_id", self.filter_symbol_id.as_deref()),
            Field::query("filter_asset_id", self.filter_asset_id.as_deref()),
        ]
    }
}

/// Request for the symbol mapping of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMapRequest {
    /// Exchange id.
    pub exchange_id: String,
}

impl SymbolMapRequest {
    /// Create a request for the mapping of `exchange_id`.
    pub fn new(exchange_id: impl Into<String>) -> Self {
        Self {
            exchange_id: exchange_id.into(),
        }
    }
}

impl Operation for SymbolMapRequest {
    type Output = Vec<SymbolMapping>;

    const OPERATION_ID: &'static str = "get_/v1/symbols/map/{exchange_id}";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = metadata::SYMBOL_MAP;

    fn fields(&self) -> Vec<Field> {
        vec![Field::path("exchange_id", self.exchange_id.as_str())]
    }
}

/// Asset metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset id.
    #[serde(default)]
    pub asset_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the asset is a cryptocurrency.
    #[serde(with = "int_bool")]
    pub type_is_crypto: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_quote_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_quote_end: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_orderbook_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_orderbook_end: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_trade_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_trade_end: Option<OffsetDateTime>,
    /// Number of symbols trading the asset.
    #[serde(default)]
    pub data_symbols_count: Option<i64>,
    /// USD volume over the last hour.
    #[serde(default)]
    pub volume_1hrs_usd: Option<Decimal>,
    /// USD volume over the last day.
    #[serde(default)]
    pub volume_1day_usd: Option<Decimal>,
    /// USD volume over the last month.
    #[serde(default)]
    pub volume_1mth_usd: Option<Decimal>,
    /// USD price.
    #[serde(default)]
    pub price_usd: Option<Decimal>,
    /// Icon id.
    #[serde(default)]
    pub id_icon: Option<String>,
    /// Current supply, present when requested.
    #[serde(default)]
    pub supply_current: Option<Decimal>,
    /// Total supply, present when requested.
    #[serde(default)]
    pub supply_total: Option<Decimal>,
    /// Maximum supply, present when requested.
    #[serde(default)]
    pub supply_max: Option<Decimal>,
    /// First day with data, `YYYY-MM-DD`.
    #[serde(default)]
    pub data_start: Option<String>,
    /// Last day with data, `YYYY-MM-DD`.
    #[serde(default)]
    pub data_end: Option<String>,
}

/// Exchange metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// Exchange id.
    #[serde(default)]
    pub exchange_id: Option<String>,
    /// Exchange website.
    #[serde(default)]
    pub website: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// First day with data, `YYYY-MM-DD`.
    #[serde(default)]
    pub data_start: Option<String>,
    /// Last day with data, `YYYY-MM-DD`.
    #[serde(default)]
    pub data_end: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_quote_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_quote_end: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_orderbook_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_orderbook_end: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_trade_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_trade_end: Option<OffsetDateTime>,
    /// Number of trades collected.
    #[serde(default)]
    pub data_trade_count: Option<i64>,
    /// Number of symbols listed.
    #[serde(default)]
    pub data_symbols_count: Option<i64>,
    #[serde(default)]
    pub volume_1hrs_usd: Option<Decimal>,
    #[serde(default)]
    pub volume_1day_usd: Option<Decimal>,
    #[serde(default)]
    pub volume_1mth_usd: Option<Decimal>,
    /// Metrics available for the exchange.
    #[serde(default)]
    pub metric_id: Option<Vec<String>>,
    /// Exchange icons.
    #[serde(default)]
    pub icons: Option<Vec<Icon>>,
}

/// Symbol metadata.
///
/// Which fields are present depends on `symbol_type` (`SPOT`, `FUTURES`,
/// `OPTION`, `PERPETUAL`, `INDEX`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol id, e.g. `BITSTAMP_SPOT_BTC_USD`.
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(default)]
    pub exchange_id: Option<String>,
    /// Symbol type.
    #[serde(default)]
    pub symbol_type: Option<String>,
    #[serde(default)]
    pub asset_id_base: Option<String>,
    #[serde(default)]
    pub asset_id_quote: Option<String>,
    #[serde(default)]
    pub asset_id_unit: Option<String>,
    #[serde(default)]
    pub future_contract_unit: Option<Decimal>,
    #[serde(default)]
    pub future_contract_unit_asset: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub future_delivery_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub option_type_is_call: Option<bool>,
    #[serde(default)]
    pub option_strike_price: Option<Decimal>,
    #[serde(default)]
    pub option_contract_unit: Option<Decimal>,
    #[serde(default)]
    pub option_exercise_style: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub option_expiration_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub contract_delivery_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub contract_unit: Option<Decimal>,
    #[serde(default)]
    pub contract_unit_asset: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub contract_display_name: Option<String>,
    #[serde(default)]
    pub contract_display_description: Option<String>,
    #[serde(default)]
    pub data_start: Option<String>,
    #[serde(default)]
    pub data_end: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_quote_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_quote_end: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_orderbook_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_orderbook_end: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_trade_start: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub data_trade_end: Option<OffsetDateTime>,
    #[serde(default)]
    pub index_id: Option<String>,
    #[serde(default)]
    pub index_display_name: Option<String>,
    #[serde(default)]
    pub index_display_description: Option<String>,
    #[serde(default)]
    pub volume_1hrs: Option<Decimal>,
    #[serde(default)]
    pub volume_1hrs_usd: Option<Decimal>,
    #[serde(default)]
    pub volume_1day: Option<Decimal>,
    #[serde(default)]
    pub volume_1day_usd: Option<Decimal>,
    #[serde(default)]
    pub volume_1mth: Option<Decimal>,
    #[serde(default)]
    pub volume_1mth_usd: Option<Decimal>,
    /// Last price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Symbol as named by the exchange.
    #[serde(default)]
    pub symbol_id_exchange: Option<String>,
    #[serde(default)]
    pub asset_id_base_exchange: Option<String>,
    #[serde(default)]
    pub asset_id_quote_exchange: Option<String>,
    /// Price tick size.
    #[serde(default)]
    pub price_precision: Option<Decimal>,
    /// Size tick size.
    #[serde(default)]
    pub size_precision: Option<Decimal>,
    /// Raw exchange-specific attributes.
    #[serde(default)]
    pub raw_kvp: Option<HashMap<String, String>>,
}

/// Mapping between CoinAPI and exchange symbol naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMapping {
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(default)]
    pub symbol_id_exchange: Option<String>,
    #[serde(default)]
    pub asset_id_base_exchange: Option<String>,
    #[serde(default)]
    pub asset_id_quote_exchange: Option<String>,
    #[serde(default)]
    pub asset_id_base: Option<String>,
    #[serde(default)]
    pub asset_id_quote: Option<String>,
    #[serde(default)]
    pub price_precision: Option<Decimal>,
    #[serde(default)]
    pub size_precision: Option<Decimal>,
}
