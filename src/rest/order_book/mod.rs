//! Level 2 order book endpoints.

mod types;

pub use types::*;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::response::ApiResponse;
use crate::types::OrderBook;

impl CoinApiClient {
    /// Get the current depth of an order book.
    pub async fn get_order_book_depth(
        &self,
        request: &OrderBookDepthRequest,
    ) -> Result<ApiResponse<OrderBookDepth>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get historical order book snapshots.
    pub async fn get_order_book_history(
        &self,
        request: &OrderBookHistoryRequest,
    ) -> Result<ApiResponse<Vec<OrderBook>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the current order book snapshot.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinapi_rest::CoinApiClient;
    /// use coinapi_rest::rest::order_book::CurrentOrderBookRequest;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinApiClient::new("my-api-key");
    ///     let request = CurrentOrderBookRequest::new("BITSTAMP_SPOT_BTC_USD").limit_levels(10);
    ///     if let Some(book) = client.get_current_order_book(&request).await?.content() {
    ///         println!("spread: {:?}", book.spread());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_current_order_book(
        &self,
        request: &CurrentOrderBookRequest,
    ) -> Result<ApiResponse<OrderBook>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the latest order book snapshots.
    pub async fn get_latest_order_books(
        &self,
        request: &LatestOrderBooksRequest,
    ) -> Result<ApiResponse<Vec<OrderBook>>, CoinApiError> {
        self.execute(request, None).await
    }
}
