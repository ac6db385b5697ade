//! Credential management for CoinAPI authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use super::Security;

/// Header carrying the CoinAPI key.
pub const API_KEY_HEADER: &str = "X-CoinAPI-Key";

/// Environment variable read by [`ApiKey::try_from_env`].
pub const API_KEY_ENV: &str = "COINAPI_KEY";

/// A CoinAPI key.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Wrap a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Get the key.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Read the key from `COINAPI_KEY`.
    ///
    /// Returns `None` if the variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_var(API_KEY_ENV)
    }

    /// Read the key from a custom environment variable.
    pub fn try_from_env_var(var: &str) -> Option<Self> {
        std::env::var(var).ok().map(Self::new)
    }

    /// The descriptor sending this key in the `X-CoinAPI-Key` header.
    pub fn to_security(&self) -> Security {
        Security::api_key_header(API_KEY_HEADER, self.expose_secret())
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

/// Where the security descriptor for a request comes from.
///
/// A provider is called again for every request, so rotated credentials are
/// picked up without rebuilding the client.
#[derive(Clone)]
pub enum SecuritySource {
    /// A fixed descriptor.
    Static(Security),
    /// A function producing the current descriptor.
    Provider(Arc<dyn Fn() -> Security + Send + Sync>),
}

impl SecuritySource {
    /// Create a provider-backed source.
    pub fn provider(provider: impl Fn() -> Security + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(provider))
    }

    /// The descriptor to use for the next request.
    pub fn resolve(&self) -> Security {
        match self {
            Self::Static(security) => security.clone(),
            Self::Provider(provider) => provider(),
        }
    }
}

impl From<Security> for SecuritySource {
    fn from(security: Security) -> Self {
        Self::Static(security)
    }
}

impl From<ApiKey> for SecuritySource {
    fn from(key: ApiKey) -> Self {
        Self::Static(key.to_security())
    }
}

impl std::fmt::Debug for SecuritySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(security) => f.debug_tuple("Static").field(security).finish(),
            Self::Provider(_) => f.write_str("Provider"),
        }
    }
}
