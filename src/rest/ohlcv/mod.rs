//! OHLCV (candlestick) endpoints.

mod types;

pub use types::*;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::response::ApiResponse;
use crate::types::TimeseriesPeriod;

impl CoinApiClient {
    /// List the periods supported by OHLCV data.
    pub async fn get_ohlcv_periods(
        &self,
    ) -> Result<ApiResponse<Vec<TimeseriesPeriod>>, CoinApiError> {
        self.execute(&OhlcvPeriodsRequest, None).await
    }

    /// Get historical OHLCV data of one symbol.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinapi_rest::CoinApiClient;
    /// use coinapi_rest::rest::ohlcv::OhlcvHistoryRequest;
    /// use time::macros::datetime;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinApiClient::new("my-api-key");
    ///     let request = OhlcvHistoryRequest::new("BITSTAMP_SPOT_BTC_USD", "1DAY")
    ///         .time_start(datetime!(2024-01-01 00:00 UTC))
    ///         .limit(7);
    ///     let candles = client.get_ohlcv_history(&request).await?.into_content();
    ///     for candle in candles.unwrap_or_default() {
    ///         println!("{} close={:?}", candle.time_period_start, candle.price_close);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_ohlcv_history(
        &self,
        request: &OhlcvHistoryRequest,
    ) -> Result<ApiResponse<Vec<TimeseriesItem>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get historical OHLCV data of every symbol of an exchange.
    pub async fn get_exchange_ohlcv_history(
        &self,
        request: &ExchangeOhlcvHistoryRequest,
    ) -> Result<ApiResponse<Vec<ExchangeTimeseriesItem>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the latest OHLCV periods of one symbol.
    pub async fn get_ohlcv_latest(
        &self,
        request: &OhlcvLatestRequest,
    ) -> Result<ApiResponse<Vec<TimeseriesItem>>, CoinApiError> {
        self.execute(request, None).await
    }
}
