//! CoinAPI REST path templates.
//!
//! `{name}` placeholders are filled from the path fields of each request.

/// Metadata endpoints.
pub mod metadata {
    /// List all assets.
    pub const ASSETS: &str = "/v1/assets";
    /// Get an asset by id.
    pub const ASSET: &str = "/v1/assets/{asset_id}";
    /// List asset icons.
    pub const ASSET_ICONS: &str = "/v1/assets/icons/{size}";
    /// List all exchanges.
    pub const EXCHANGES: &str = "/v1/exchanges";
    /// Get an exchange by id.
    pub const EXCHANGE: &str = "/v1/exchanges/{exchange_id}";
    /// List exchange icons.
    pub const EXCHANGE_ICONS: &str = "/v1/exchanges/icons/{size}";
    /// Metadata root.
    pub const METADATA: &str = "/v1/metadata";
    /// List all symbols.
    pub const SYMBOLS: &str = "/v1/symbols";
    /// List symbols of one exchange.
    pub const EXCHANGE_SYMBOLS: &str = "/v1/symbols/{exchange_id}";
    /// Symbol mapping of one exchange.
    pub const SYMBOL_MAP: &str = "/v1/symbols/map/{exchange_id}";
}

/// Exchange rate endpoints.
pub mod exchange_rates {
    /// Rate between two assets.
    pub const SPECIFIC_RATE: &str = "/v1/exchangerate/{asset_id_base}/{asset_id_quote}";
    /// Rates between one asset and all others.
    pub const BASE_RATES: &str = "/v1/exchangerate/{asset_id_base}";
    /// Supported timeseries periods.
    pub const HISTORY_PERIODS: &str = "/v1/exchangerate/history/periods";
    /// Rate timeseries between two assets.
    pub const PAIR_HISTORY: &str = "/v1/exchangerate/{asset_id_base}/{asset_id_quote}/history";
}

/// Index endpoints.
pub mod indexes {
    /// List indexes, or create one.
    pub const INDEXES: &str = "/v1/indexes";
    /// Get or update one index.
    pub const INDEX: &str = "/v1/indexes/{index_id}";
    /// Historical index values.
    pub const HISTORY: &str = "/v1/indexes/{index_id}/history";
    /// Index value timeseries.
    pub const TIMESERIES: &str = "/v1/indexes/{index_id}/timeseries";
    /// Index value timeseries for a composite source.
    pub const SOURCE_TIMESERIES: &str = "/v1/indexes/{index_id}/timeseries/TO_BE_ANNOUNCED";
}

/// Metrics endpoints.
pub mod metrics {
    /// All metric definitions.
    pub const LISTING: &str = "/v1/metrics/listing";
    /// Metrics available for exchanges.
    pub const EXCHANGE_LISTING: &str = "/v1/metrics/exchange/listing";
    /// Current exchange metrics.
    pub const EXCHANGE_CURRENT: &str = "/v1/metrics/exchange/current";
    /// Historical exchange metrics.
    pub const EXCHANGE_HISTORY: &str = "/v1/metrics/exchange/history";
    /// Metrics available for symbols.
    pub const SYMBOL_LISTING: &str = "/v1/metrics/symbol/listing";
    /// Current symbol metrics.
    pub const SYMBOL_CURRENT: &str = "/v1/metrics/symbol/current";
    /// Historical symbol metrics.
    pub const SYMBOL_HISTORY: &str = "/v1/metrics/symbol/history";
    /// Metrics available for assets.
    pub const ASSET_LISTING: &str = "/v1/metrics/asset/listing";
    /// Current asset metrics.
    pub const ASSET_CURRENT: &str = "/v1/metrics/asset/current";
    /// Historical asset metrics.
    pub const ASSET_HISTORY: &str = "/v1/metrics/asset/history";
}

/// OHLCV endpoints.
pub mod ohlcv {
    /// Supported timeseries periods.
    pub const PERIODS: &str = "/v1/ohlcv/periods";
    /// Historical OHLCV of one symbol.
    pub const SYMBOL_HISTORY: &str = "/v1/ohlcv/{symbol_id}/history";
    /// Historical OHLCV of all symbols of one exchange.
    pub const EXCHANGE_HISTORY: &str = "/v1/ohlcv/exchanges/{exchange_id}/history";
    /// Latest OHLCV of one symbol.
    pub const SYMBOL_LATEST: &str = "/v1/ohlcv/{symbol_id}/latest";
}

/// Order book endpoints.
pub mod order_book {
    /// Current depth of one book.
    pub const DEPTH_CURRENT: &str = "/v1/orderbooks/{symbol_id}/depth/current";
    /// Historical snapshots.
    pub const HISTORY: &str = "/v1/orderbooks/{symbol_id}/history";
    /// Current snapshot.
    pub const CURRENT: &str = "/v1/orderbooks/{symbol_id}/current";
    /// Latest snapshots.
    pub const LATEST: &str = "/v1/orderbooks/{symbol_id}/latest";
}

/// Level 3 order book endpoints.
pub mod order_book_l3 {
    /// Current books of all symbols.
    pub const CURRENT: &str = "/v1/orderbooks3/current";
    /// Current book of one symbol.
    pub const SYMBOL_CURRENT: &str = "/v1/orderbooks3/{symbol_id}/current";
}

/// Quote endpoints.
pub mod quotes {
    /// Historical quotes of one symbol.
    pub const SYMBOL_HISTORY: &str = "/v1/quotes/{symbol_id}/history";
    /// Current quotes of all symbols.
    pub const CURRENT: &str = "/v1/quotes/current";
    /// Current quote of one symbol.
    pub const SYMBOL_CURRENT: &str = "/v1/quotes/{symbol_id}/current";
    /// Latest quotes of all symbols.
    pub const LATEST: &str = "/v1/quotes/latest";
    /// Latest quotes of one symbol.
    pub const SYMBOL_LATEST: &str = "/v1/quotes/{symbol_id}/latest";
}

/// Trade endpoints.
pub mod trades {
    /// Historical trades of one symbol.
    pub const SYMBOL_HISTORY: &str = "/v1/trades/{symbol_id}/history";
    /// Latest trades of one symbol.
    pub const SYMBOL_LATEST: &str = "/v1/trades/{symbol_id}/latest";
    /// Latest trades of all symbols.
    pub const LATEST: &str = "/v1/trades/latest";
}
