//! CoinAPI REST endpoints.
//!
//! Each section holds the request structs of one API area together with the
//! [`CoinApiClient`](crate::CoinApiClient) methods that send them. Request
//! structs implement [`Operation`](crate::Operation), so they can also be
//! passed to [`CoinApiClient::execute`](crate::CoinApiClient::execute)
//! directly, for example to override the `Accept` header.
//!
//! ```rust,no_run
//! use coinapi_rest::{Accept, CoinApiClient};
//! use coinapi_rest::rest::quotes::CurrentQuoteRequest;
//!
//! # async fn run() -> Result<(), coinapi_rest::CoinApiError> {
//! let client = CoinApiClient::new("my-api-key");
//! let response = client
//!     .execute(&CurrentQuoteRequest::new("BITSTAMP_SPOT_BTC_USD"), Some(Accept::TextPlain))
//!     .await?;
//! println!("{:?}", response.content_plain());
//! # Ok(())
//! # }
//! ```

pub mod endpoints;
pub mod exchange_rates;
pub mod indexes;
pub mod metadata;
pub mod metrics;
pub mod ohlcv;
pub mod order_book;
pub mod order_book_l3;
pub mod quotes;
pub mod trades;
