//! # CoinAPI REST Client
//!
//! An async Rust client library for the CoinAPI market data REST API.
//!
//! ## Features
//!
//! - Typed request structs and models for every REST endpoint
//! - Declarative parameter serialization (path, query, header, form, multipart)
//! - Pluggable authentication with static keys or per-request providers
//! - Hooks around client construction, requests, responses and errors
//! - Content negotiation across JSON, plain text and msgpack
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coinapi_rest::CoinApiClient;
//! use coinapi_rest::rest::metadata::ExchangesRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinApiClient::new("my-api-key");
//!     let response = client.list_exchanges(&ExchangesRequest::new()).await?;
//!     for exchange in response.content().into_iter().flatten() {
//!         println!("{:?} {:?}", exchange.exchange_id, exchange.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod http;
pub mod rate_limit;
pub mod request;
pub mod response;
pub mod rest;
pub mod serialization;
pub mod types;

// Re-export commonly used types at crate root
pub use client::{CoinApiClient, CoinApiClientBuilder};
pub use error::{ApiError, CoinApiError};
pub use request::{Accept, Operation};
pub use response::{ApiResponse, Payload};

/// Result type alias using CoinApiError
pub type Result<T> = std::result::Result<T, CoinApiError>;
