//! Quote (best bid and offer) endpoints.

mod types;

pub use types::*;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::response::ApiResponse;

impl CoinApiClient {
    /// Get historical quotes of one symbol.
    pub async fn get_quotes_history(
        &self,
        request: &QuotesHistoryRequest,
    ) -> Result<ApiResponse<Vec<Quote>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the current quotes of all symbols.
    pub async fn get_current_quotes(
        &self,
        request: &CurrentQuotesRequest,
    ) -> Result<ApiResponse<Vec<QuoteTrade>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the current quote of one symbol.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinapi_rest::CoinApiClient;
    /// use coinapi_rest::rest::quotes::CurrentQuoteRequest;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinApiClient::new("my-api-key");
    ///     let request = CurrentQuoteRequest::new("BITSTAMP_SPOT_BTC_USD");
    ///     let response = client.get_current_quote(&request).await?;
    ///     if let Some(quote) = response.content() {
    ///         println!("bid {:?} ask {:?}", quote.bid_price, quote.ask_price);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_current_quote(
        &self,
        request: &CurrentQuoteRequest,
    ) -> Result<ApiResponse<QuoteTrade>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the latest quotes across all symbols.
    pub async fn get_latest_quotes(
        &self,
        request: &LatestQuotesRequest,
    ) -> Result<ApiResponse<Vec<Quote>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the latest quotes of one symbol.
    pub async fn get_symbol_latest_quotes(
        &self,
        request: &SymbolLatestQuotesRequest,
    ) -> Result<ApiResponse<Vec<Quote>>, CoinApiError> {
        self.execute(request, None).await
    }
}
