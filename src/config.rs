//! Client configuration: server selection, timeouts and identification.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::SecuritySource;
use crate::error::CoinApiError;
use crate::http::HttpTransport;

/// Default CoinAPI servers, selectable by index.
pub const SERVERS: &[&str] = &["https://rest.coinapi.io"];

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// User agent attached to every request.
pub const USER_AGENT: &str =
    concat!("coinapi-rest/rust ", env!("CARGO_PKG_VERSION"), " CoinAPI v1");

/// Replace every `{name}` placeholder in a server URL template.
pub fn template_url(url: &str, params: &HashMap<String, String>) -> String {
    params.iter().fold(url.to_string(), |url, (key, value)| {
        url.replace(&format!("{{{key}}}"), value)
    })
}

/// Resolved settings shared by every call of one client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Explicit server URL; overrides `server_idx` when non-empty.
    pub server_url: Option<String>,
    /// Index into [`SERVERS`].
    pub server_idx: usize,
    /// Credentials, if any.
    pub security: Option<SecuritySource>,
    /// Shared transport; a fresh single-connection transport is used per
    /// call when unset.
    pub transport: Option<Arc<dyn HttpTransport>>,
    /// Request timeout for transports created by the client.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl ClientConfig {
    /// The base URL requests are sent to, without a trailing slash.
    pub fn server_details(&self) -> Result<String, CoinApiError> {
        if let Some(url) = self.server_url.as_deref().filter(|url| !url.is_empty()) {
            return Ok(url.trim_end_matches('/').to_string());
        }
        SERVERS
            .get(self.server_idx)
            .map(|url| url.to_string())
            .ok_or_else(|| {
                CoinApiError::Config(format!(
                    "server index {} is out of range (0..{})",
                    self.server_idx,
                    SERVERS.len()
                ))
            })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            server_idx: 0,
            security: None,
            transport: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_url", &self.server_url)
            .field("server_idx", &self.server_idx)
            .field("has_security", &self.security.is_some())
            .field("has_transport", &self.transport.is_some())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
