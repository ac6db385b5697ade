//! Level 3 (order by order) book endpoints.

use reqwest::Method;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::request::Operation;
use crate::response::ApiResponse;
use crate::rest::endpoints::order_book_l3;
use crate::serialization::Field;
use crate::types::OrderBook;

/// Request for the current level 3 books of all symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentL3OrderBooksRequest {
    /// Comma or semicolon delimited symbol id prefixes.
    pub filter_symbol_id: Option<String>,
    /// Maximum number of orders per side.
    pub limit_levels: Option<u32>,
}

impl CurrentL3OrderBooksRequest {
    /// Create an unfiltered request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict by symbol id prefix.
    pub fn filter_symbol_id(mut self, filter: impl Into<String>) -> Self {
        self.filter_symbol_id = Some(filter.into());
        self
    }

    /// Limit the orders per side.
    pub fn limit_levels(mut self, levels: u32) -> Self {
        self.limit_levels = Some(levels);
        self
    }
}

impl Operation for CurrentL3OrderBooksRequest {
    type Output = Vec<OrderBook>;

    const OPERATION_ID: &'static str = "get_/v1/orderbooks3/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = order_book_l3::CURRENT;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::query("filter_symbol_id", self.filter_symbol_id.as_deref()),
            Field::query("limit_levels", self.limit_levels),
        ]
    }
}

/// Request for the current level 3 book of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentL3OrderBookRequest {
    /// Symbol id.
    pub symbol_id: String,
    /// Maximum number of orders per side.
    pub limit_levels: Option<u32>,
}

impl CurrentL3OrderBookRequest {
    /// Create a request for `symbol_id`.
    pub fn new(symbol_id: impl Into<String>) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            limit_levels: None,
        }
    }

    /// Limit the orders per side.
    pub fn limit_levels(mut self, levels: u32) -> Self {
        self.limit_levels = Some(levels);
        self
    }
}

impl Operation for CurrentL3OrderBookRequest {
    type Output = OrderBook;

    const OPERATION_ID: &'static str = "get_/v1/orderbooks3/{symbol_id}/current";
    const METHOD: Method = Method::GET;
    const PATH: &'static str = order_book_l3::SYMBOL_CURRENT;

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::path("symbol_id", self.symbol_id.as_str()),
            Field::query("limit_levels", self.limit_levels),
        ]
    }
}

impl CoinApiClient {
    /// Get the current level 3 books of all symbols.
    ///
    /// Levels carry the order id in [`OrderBookLevel::id`](crate::types::OrderBookLevel::id).
    pub async fn get_current_l3_order_books(
        &self,
        request: &CurrentL3OrderBooksRequest,
    ) -> Result<ApiResponse<Vec<OrderBook>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the current level 3 book of one symbol.
    pub async fn get_current_l3_order_book(
        &self,
        request: &CurrentL3OrderBookRequest,
    ) -> Result<ApiResponse<OrderBook>, CoinApiError> {
        self.execute(request, None).await
    }
}
