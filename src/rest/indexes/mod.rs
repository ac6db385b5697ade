//! Index endpoints.
//!
//! The indexes API is in an alpha release cycle on CoinAPI's side.

mod types;

pub use types::*;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::response::ApiResponse;

impl CoinApiClient {
    /// List available indexes.
    pub async fn list_indexes(&self) -> Result<ApiResponse<Vec<Index>>, CoinApiError> {
        self.execute(&ListIndexesRequest, None).await
    }

    /// Create an index.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinapi_rest::CoinApiClient;
    /// use coinapi_rest::rest::indexes::{CreateIndexRequest, IndexData};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinApiClient::new("my-api-key");
    ///     let index = IndexData {
    ///         name: Some("Large caps".to_string()),
    ///         period_recalculation: Some("1DAY".to_string()),
    ///         ..Default::default()
    ///     };
    ///     let created = client.create_index(&CreateIndexRequest::new(index)).await?;
    ///     println!("{:?}", created.content());
    ///     Ok(())
    /// }
    /// ```
    pub async fn create_index(
        &self,
        request: &CreateIndexRequest,
    ) -> Result<ApiResponse<IndexDataResponse>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get an index definition.
    pub async fn get_index(
        &self,
        request: &IndexRequest,
    ) -> Result<ApiResponse<IndexData>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Replace an index definition.
    pub async fn update_index(
        &self,
        request: &UpdateIndexRequest,
    ) -> Result<ApiResponse<IndexDataResponse>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Replace an index definition with a MessagePack encoded document.
    pub async fn update_index_raw(
        &self,
        request: &UpdateIndexRawRequest,
    ) -> Result<ApiResponse<IndexDataResponse>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get historical index values and compositions.
    pub async fn get_index_history(
        &self,
        request: &IndexHistoryRequest,
    ) -> Result<ApiResponse<Vec<IndexValue>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get an index value timeseries.
    pub async fn get_index_timeseries(
        &self,
        request: &IndexTimeseriesRequest,
    ) -> Result<ApiResponse<Vec<IndexTimeseriesItem>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the timeseries of one composite source of an index.
    pub async fn get_index_source_timeseries(
        &self,
        request: &SourceTimeseriesRequest,
    ) -> Result<ApiResponse<Vec<IndexTimeseriesItem>>, CoinApiError> {
        self.execute(request, None).await
    }
}
