//! Metadata endpoints: assets, exchanges, symbols and icons.

mod types;

pub use types::*;

use crate::client::CoinApiClient;
use crate::error::CoinApiError;
use crate::response::ApiResponse;
use crate::types::Icon;

impl CoinApiClient {
    /// List assets.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinapi_rest::CoinApiClient;
    /// use coinapi_rest::rest::metadata::AssetsRequest;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinApiClient::new("my-api-key");
    ///     let request = AssetsRequest::new().filter_asset_id("BTC;ETH").include_supply(true);
    ///     let assets = client.list_assets(&request).await?.into_content().unwrap_or_default();
    ///     for asset in assets {
    ///         println!("{:?}: {:?}", asset.asset_id, asset.supply_current);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn list_assets(
        &self,
        request: &AssetsRequest,
    ) -> Result<ApiResponse<Vec<Asset>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get one asset by id.
    pub async fn get_asset(
        &self,
        request: &AssetRequest,
    ) -> Result<ApiResponse<Vec<Asset>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// List asset icons of the given size.
    pub async fn list_asset_icons(
        &self,
        request: &AssetIconsRequest,
    ) -> Result<ApiResponse<Vec<Icon>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// List exchanges.
    pub async fn list_exchanges(
        &self,
        request: &ExchangesRequest,
    ) -> Result<ApiResponse<Vec<Exchange>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get one exchange by id.
    pub async fn get_exchange(
        &self,
        request: &ExchangeRequest,
    ) -> Result<ApiResponse<Vec<Exchange>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// List exchange icons of the given size.
    pub async fn list_exchange_icons(
        &self,
        request: &ExchangeIconsRequest,
    ) -> Result<ApiResponse<Vec<Icon>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the metadata root document.
    pub async fn get_metadata(&self) -> Result<ApiResponse<serde_json::Value>, CoinApiError> {
        self.execute(&MetadataRequest, None).await
    }

    /// List symbols across all exchanges.
    pub async fn list_symbols(
        &self,
        request: &SymbolsRequest,
    ) -> Result<ApiResponse<Vec<Symbol>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// List the symbols of one exchange.
    pub async fn list_exchange_symbols(
        &self,
        request: &ExchangeSymbolsRequest,
    ) -> Result<ApiResponse<Vec<Symbol>>, CoinApiError> {
        self.execute(request, None).await
    }

    /// Get the symbol mapping of one exchange.
    pub async fn get_symbol_mapping(
        &self,
        request: &SymbolMapRequest,
    ) -> Result<ApiResponse<Vec<SymbolMapping>>, CoinApiError> {
        self.execute(request, None).await
    }
}
