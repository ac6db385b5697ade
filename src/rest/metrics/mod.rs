//! Metrics endpoints for exchanges, symbols and assets.

mod types;

pub use types::*;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::response::ApiResponse;

impl CoinApiClient {
    /// List all metric definitions.
    pub async fn list_metrics(&self) -> Result<ApiResponse<Vec<Metric>>, CoinApiError> {
        self.execute(&MetricsListingRequest, None).await
    }

    /// List the metrics available for an exchange.
    pub async fn list_exchange_metrics(
        &self,
        request: &ExchangeMetricsListingRequest,
    ) -> Result<ApiResponse<Vec<ListingItem>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the current metrics of an exchange.
    pub async fn get_exchange_metrics_current(
        &self,
        request: &ExchangeMetricsCurrentRequest,
    ) -> Result<ApiResponse<Vec<GeneralData>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the history of an exchange metric.
    pub async fn get_exchange_metrics_history(
        &self,
        request: &ExchangeMetricsHistoryRequest,
    ) -> Result<ApiResponse<Vec<MetricData>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// List the metrics available for symbols.
    pub async fn list_symbol_metrics(
        &self,
        request: &SymbolMetricsListingRequest,
    ) -> Result<ApiResponse<Vec<ListingItem>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get current symbol metrics.
    pub async fn get_symbol_metrics_current(
        &self,
        request: &SymbolMetricsCurrentRequest,
    ) -> Result<ApiResponse<Vec<GeneralData>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the history of a symbol metric.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinapi_rest::CoinApiClient;
    /// use coinapi_rest::rest::metrics::{HistoryRange, SymbolMetricsHistoryRequest};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinApiClient::new("my-api-key");
    ///     let request = SymbolMetricsHistoryRequest::new(
    ///         "DERIVATIVES_FUNDING_RATE_CURRENT",
    ///         "DERIBIT_PERP_BTC_USD",
    ///     )
    ///     .range(HistoryRange::new().period_id("1DAY").limit(30));
    ///     let points = client.get_symbol_metrics_history(&request).await?.into_content();
    ///     for point in points.unwrap_or_default() {
    ///         println!("{} {}", point.time, point.value);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_symbol_metrics_history(
        &self,
        request: &SymbolMetricsHistoryRequest,
    ) -> Result<ApiResponse<Vec<MetricData>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// List the metrics available for assets.
    pub async fn list_asset_metrics(
        &self,
        request: &AssetMetricsListingRequest,
    ) -> Result<ApiResponse<Vec<ListingItem>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get current asset metrics.
    pub async fn get_asset_metrics_current(
        &self,
        request: &AssetMetricsCurrentRequest,
    ) -> Result<ApiResponse<Vec<GeneralData>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the history of an asset metric.
    pub async fn get_asset_metrics_history(
        &self,
        request: &AssetMetricsHistoryRequest,
    ) -> Result<ApiResponse<Vec<MetricData>>, CoinApiError> {
        self.execute(request, None).await
    }
}
