//! Exchange rate endpoints.
//!
//! Rates are VWAP-24H prices aggregated across the data sources CoinAPI
//! considers legitimate.

mod types;

pub use types::*;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::response::ApiResponse;
use crate::types::TimeseriesPeriod;

impl CoinApiClient {
    /// Get the exchange rate between two assets.
    ///
    /// Returns the current rate unless the request carries a `time`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinapi_rest::CoinApiClient;
    /// use coinapi_rest::rest::exchange_rates::SpecificRateRequest;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinApiClient::new("my-api-key");
    ///     let response = client.get_specific_rate(&SpecificRateRequest::new("BTC", "EUR")).await?;
    ///     println!("{:?}", response.content());
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_specific_rate(
        &self,
        request: &SpecificRateRequest,
    ) -> Result<ApiResponse<ExchangeRate>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the current rates between an asset and all other assets.
    pub async fn get_base_rates(
        &self,
        request: &BaseRatesRequest,
    ) -> Result<ApiResponse<ExchangeRates>, CoinApiError> {
        self.execute(request, None).await
    }

    /// List the periods supported by exchange rate timeseries.
    pub async fn get_exchange_rate_periods(
        &self,
    ) -> Result<ApiResponse<Vec<TimeseriesPeriod>>, CoinApiError> {
        self.execute(&HistoryPeriodsRequest, None).await
    }

    /// Get the historical rates between two assets as a timeseries.
    pub async fn get_pair_history(
        &self,
        request: &PairHistoryRequest,
    ) -> Result<ApiResponse<Vec<ExchangeRatesTimeseriesItem>>, CoinApiError> {
        self.execute(request, None).await
    }
}
