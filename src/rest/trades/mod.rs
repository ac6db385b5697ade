//! Trade endpoints.

mod types;

pub use types::*;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::response::ApiResponse;

impl CoinApiClient {
    /// Get historical trades of one symbol.
    pub async fn get_trades_history(
        &self,
        request: &TradesHistoryRequest,
    ) -> Result<ApiResponse<Vec<Trade>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the latest trades of one symbol.
    pub async fn get_symbol_latest_trades(
        &self,
        request: &SymbolLatestTradesRequest,
    ) -> Result<ApiResponse<Vec<Trade>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the latest trades across all symbols.
    pub async fn get_latest_trades(
        &self,
        request: &LatestTradesRequest,
    ) -> Result<ApiResponse<Vec<Trade>>, CoinApiError> {
        self.execute(request, None).await
    }
}
