//! Authentication module for CoinAPI.
//!
//! This module provides:
//! - API key management with secure secret storage
//! - Security descriptors covering apiKey, http, oauth2 and openIdConnect schemes
//! - The resolver turning a descriptor into injected headers and query parameters

mod credentials;
mod security;

pub use credentials::{API_KEY_ENV, API_KEY_HEADER, ApiKey, SecuritySource};
pub use security::{
    RequestDecorator, SchemeType, Security, SecurityField, SecurityTag, SecurityValue, SubType,
    configure,
};
