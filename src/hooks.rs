//! Lifecycle hooks.
//!
//! Four stages can be intercepted, each with its own ordered list:
//!
//! - **init** runs once when the client is built and may rewrite the server
//!   URL or swap the transport.
//! - **before-request** may replace the built request or abort the call.
//! - **after-success** may replace a non-error response or turn it into an error.
//! - **after-error** sees transport failures and 4XX/5XX responses and may
//!   reclassify the error or recover with a response.
//!
//! Hooks run in registration order. An `Err` from any hook stops its stage.
//!
//! # Example
//!
//! ```rust,no_run
//! use coinapi_rest::CoinApiClient;
//! use coinapi_rest::hooks::{BeforeRequestHook, HookContext};
//! use coinapi_rest::http::HttpRequest;
//!
//! struct Tag;
//!
//! impl BeforeRequestHook for Tag {
//!     fn before_request(
//!         &self,
//!         _ctx: &HookContext,
//!         mut request: HttpRequest,
//!     ) -> coinapi_rest::Result<HttpRequest> {
//!         request.query.push(("source".to_string(), "docs".to_string()));
//!         Ok(request)
//!     }
//! }
//!
//! let client = CoinApiClient::builder()
//!     .api_key("my-key")
//!     .before_request_hook(Tag)
//!     .build();
//! ```

use std::sync::Arc;

use crate::auth::SecuritySource;
use crate::error::CoinApiError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};

/// Per-call information handed to hooks.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Identifier of the operation being executed.
    pub operation_id: &'static str,
    /// OAuth 2 scopes required by the operation.
    pub oauth2_scopes: Vec<String>,
    /// The client's credential source.
    pub security_source: Option<SecuritySource>,
}

impl HookContext {
    /// Create a context for an operation.
    pub fn new(operation_id: &'static str, security_source: Option<SecuritySource>) -> Self {
        Self {
            operation_id,
            oauth2_scopes: Vec::new(),
            security_source,
        }
    }
}

/// Hook run once at client construction.
pub trait SdkInitHook: Send + Sync {
    /// Return the (possibly rewritten) base URL and transport.
    fn sdk_init(
        &self,
        base_url: String,
        transport: Option<Arc<dyn HttpTransport>>,
    ) -> (String, Option<Arc<dyn HttpTransport>>);
}

/// Hook run before a request is dispatched.
pub trait BeforeRequestHook: Send + Sync {
    /// Return the request to send, or an error to abort the call.
    fn before_request(
        &self,
        ctx: &HookContext,
        request: HttpRequest,
    ) -> Result<HttpRequest, CoinApiError>;
}

/// Hook run after a non-error response arrives.
pub trait AfterSuccessHook: Send + Sync {
    /// Return the response to decode, or an error for the caller.
    fn after_success(
        &self,
        ctx: &HookContext,
        response: HttpResponse,
    ) -> Result<HttpResponse, CoinApiError>;
}

/// Hook run after a transport failure or a 4XX/5XX response.
pub trait AfterErrorHook: Send + Sync {
    /// Return the (possibly replaced) response/error pair.
    ///
    /// Leaving the error unset together with a response recovers the call.
    fn after_error(
        &self,
        ctx: &HookContext,
        response: Option<HttpResponse>,
        error: Option<CoinApiError>,
    ) -> Result<(Option<HttpResponse>, Option<CoinApiError>), CoinApiError>;
}

impl<F> SdkInitHook for F
where
    F: Fn(String, Option<Arc<dyn HttpTransport>>) -> (String, Option<Arc<dyn HttpTransport>>)
        + Send
        + Sync,
{
    fn sdk_init(
        &self,
        base_url: String,
        transport: Option<Arc<dyn HttpTransport>>,
    ) -> (String, Option<Arc<dyn HttpTransport>>) {
        self(base_url, transport)
    }
}

impl<F> BeforeRequestHook for F
where
    F: Fn(&HookContext, HttpRequest) -> Result<HttpRequest, CoinApiError> + Send + Sync,
{
    fn before_request(
        &self,
        ctx: &HookContext,
        request: HttpRequest,
    ) -> Result<HttpRequest, CoinApiError> {
        self(ctx, request)
    }
}

impl<F> AfterSuccessHook for F
where
    F: Fn(&HookContext, HttpResponse) -> Result<HttpResponse, CoinApiError> + Send + Sync,
{
    fn after_success(
        &self,
        ctx: &HookContext,
        response: HttpResponse,
    ) -> Result<HttpResponse, CoinApiError> {
        self(ctx, response)
    }
}

impl<F> AfterErrorHook for F
where
    F: Fn(
            &HookContext,
            Option<HttpResponse>,
            Option<CoinApiError>,
        ) -> Result<(Option<HttpResponse>, Option<CoinApiError>), CoinApiError>
        + Send
        + Sync,
{
    fn after_error(
        &self,
        ctx: &HookContext,
        response: Option<HttpResponse>,
        error: Option<CoinApiError>,
    ) -> Result<(Option<HttpResponse>, Option<CoinApiError>), CoinApiError> {
        self(ctx, response, error)
    }
}

/// The hook registry owned by one client.
///
/// Filled while the client is built and read-only afterwards.
#[derive(Clone, Default)]
pub struct Hooks {
    sdk_init: Vec<Arc<dyn SdkInitHook>>,
    before_request: Vec<Arc<dyn BeforeRequestHook>>,
    after_success: Vec<Arc<dyn AfterSuccessHook>>,
    after_error: Vec<Arc<dyn AfterErrorHook>>,
}

impl Hooks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an init hook.
    pub fn register_sdk_init_hook(&mut self, hook: impl SdkInitHook + 'static) {
        self.sdk_init.push(Arc::new(hook));
    }

    /// Append a before-request hook.
    pub fn register_before_request_hook(&mut self, hook: impl BeforeRequestHook + 'static) {
        self.before_request.push(Arc::new(hook));
    }

    /// Append an after-success hook.
    pub fn register_after_success_hook(&mut self, hook: impl AfterSuccessHook + 'static) {
        self.after_success.push(Arc::new(hook));
    }

    /// Append an after-error hook.
    pub fn register_after_error_hook(&mut self, hook: impl AfterErrorHook + 'static) {
        self.after_error.push(Arc::new(hook));
    }

    /// Run the init stage.
    pub fn sdk_init(
        &self,
        base_url: String,
        transport: Option<Arc<dyn HttpTransport>>,
    ) -> (String, Option<Arc<dyn HttpTransport>>) {
        self.sdk_init
            .iter()
            .fold((base_url, transport), |(url, transport), hook| hook.sdk_init(url, transport))
    }

    /// Run the before-request stage.
    pub fn before_request(
        &self,
        ctx: &HookContext,
        mut request: HttpRequest,
    ) -> Result<HttpRequest, CoinApiError> {
        for hook in &self.before_request {
            request = hook.before_request(ctx, request)?;
        }
        Ok(request)
    }

    /// Run the after-success stage.
    pub fn after_success(
        &self,
        ctx: &HookContext,
        mut response: HttpResponse,
    ) -> Result<HttpResponse, CoinApiError> {
        for hook in &self.after_success {
            response = hook.after_success(ctx, response)?;
        }
        Ok(response)
    }

    /// Run the after-error stage.
    pub fn after_error(
        &self,
        ctx: &HookContext,
        mut response: Option<HttpResponse>,
        mut error: Option<CoinApiError>,
    ) -> Result<(Option<HttpResponse>, Option<CoinApiError>), CoinApiError> {
        for hook in &self.after_error {
            (response, error) = hook.after_error(ctx, response, error)?;
        }
        Ok((response, error))
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("sdk_init", &self.sdk_init.len())
            .field("before_request", &self.before_request.len())
            .field("after_success", &self.after_success.len())
            .field("after_error", &self.after_error.len())
            .finish()
    }
}
