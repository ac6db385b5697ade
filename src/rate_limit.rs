//! Rate-limit information reported by CoinAPI.
//!
//! The server describes its quota in response headers. The client only
//! exposes them; nothing is throttled or retried.

use reqwest::header::HeaderMap;

/// Values of the `X-RateLimit-*` and `X-ConcurrencyLimit-*` headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// Requests allowed in the current period.
    pub limit: Option<u64>,
    /// Requests left in the current period.
    pub remaining: Option<u64>,
    /// Cost of the request that produced this response.
    pub request_cost: Option<u64>,
    /// When the quota resets, as sent by the server.
    pub reset: Option<String>,
    /// Concurrent requests allowed.
    pub concurrency_limit: Option<u64>,
    /// Concurrent requests left.
    pub concurrency_remaining: Option<u64>,
}

impl RateLimitHeaders {
    /// Read the headers; missing or malformed values are `None`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let text = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim);
        let number = |name: &str| text(name).and_then(|v| v.parse().ok());

        Self {
            limit: number("x-ratelimit-limit"),
            remaining: number("x-ratelimit-remaining"),
            request_cost: number("x-ratelimit-request-cost"),
            reset: text("x-ratelimit-reset").map(str::to_string),
            concurrency_limit: number("x-concurrencylimit-limit"),
            concurrency_remaining: number("x-concurrencylimit-remaining"),
        }
    }

    /// Whether the quota for the current period is used up.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}
