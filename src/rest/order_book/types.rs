//! Types for order book endpoints.

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::request::Operation;
use crate::rest::endpoints::order_book;
use crate::serialization::Field;
use crate::types::OrderBook;

/// Request for the current depth of an order book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBookDepthRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Maximum number of levels per side.
    pub limit_levels: Option<u32>,
}

impl OrderBookDepthRequest {
    /// Create a depth request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            limit_levels: None,
        }
    }

    /// Limit the levels per side.
    pub fn limit_levels(mut self, levels: u32) -> Self {
        self.limit_levels = Some(levels);
        self
    }

    fn symbol_fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("limit_levels", self.limit_levels),
        ]
    }
}

impl Operation for OrderBookDepthRequest {
    type Output = OrderBookDepth;

    const OPERATION_ID: &'static str = "get_/v1/orderbooks/{symbol_id}/depth/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = order_book::DEPTH_CURRENT;

    fn fields(&self) -> Vec<Field> {
        self.symbol_fields()
    }
}

/// Request for the current snapshot of an order book.
///
/// Takes the same parameters as [`OrderBookDepthRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentOrderBookRequest(pub OrderBookDepthRequest);

impl CurrentOrderBookRequest {
    /// Create a snapshot request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self(OrderBookDepthRequest::new(symbol_id))
    }

    /// Limit the levels per side.
    pub fn limit_levels(self, levels: u32) -> Self {
        Self(self.0.limit_levels(levels))
    }
}

impl Operation for CurrentOrderBookRequest {
    type Output = OrderBook;

    const OPERATION_ID: &'static str = "get_/v1/orderbooks/{symbol_id}/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = order_book::CURRENT;

    fn fields(&self) -> Vec<Field> {
        self.0.symbol_fields()
    }
}

/// Request for historical order book snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBookHistoryRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Start of the range (inclusive).
    pub time_start: Option<OffsetDateTime>,
    /// End of the range (exclusive).
    pub time_end: Option<OffsetDateTime>,
    /// Maximum number of snapshots.
    pub limit: Option<u32>,
    /// Maximum number of levels per side.
    pub limit_levels: Option<u32>,
}

impl OrderBookHistoryRequest {
    /// Create a history request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            time_start: None,
            time_end: None,
            limit: Some(100),
            limit_levels: None,
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

    /// Set the maximum number of snapshots.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Limit the levels per side.
    pub fn limit_levels(mut self, levels: u32) -> Self {
        self.limit_levels = Some(levels);
        self
    }
}

impl Operation for OrderBookHistoryRequest {
    type Output = Vec<OrderBook>;

    const OPERATION_ID: &'static str = "get_/v1/orderbooks/{symbol_id}/history";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = order_book::HISTORY;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("time_start", self.time_start),
            Field::query("time_end", self.time_end),
            Field::query("limit", self.limit),
            Field::query("limit_levels", self.limit_levels),
        ]
    }
}

/// Request for the latest order book snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestOrderBooksRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Maximum number of snapshots.
    pub limit: Option<u32>,
    /// Maximum number of levels per side.
    pub limit_levels: Option<u32>,
}

impl LatestOrderBooksRequest {
    /// Create a request for the latest snapshots of `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            limit: Some(100),
            limit_levels: None,
        }
    }

    /// Set the maximum number of snapshots.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Limit the levels per side.
    pub fn limit_levels(mut self, levels: u32) -> Self {
        self.limit_levels = Some(levels);
        self
    }
}

impl Operation for LatestOrderBooksRequest {
    type Output = Vec<OrderBook>;

    const OPERATION_ID: &'static str = "get_/v1/orderbooks/{symbol_id}/latest";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = order_book::LATEST;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("limit", self.limit),
            Field::query("limit_levels", self.limit_levels),
        ]
    }
}

/// Aggregated depth of an order book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookDepth {
    #[serde(default)]
    pub symbol_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub time_exchange: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_coinapi: OffsetDateTime,
    /// Number of ask levels.
    pub ask_levels: i64,
    /// Number of bid levels.
    pub bid_levels: i64,
    /// Total ask volume.
    pub ask_depth: Decimal,
    /// Total bid volume.
    pub bid_depth: Decimal,
}
