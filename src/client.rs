//! CoinAPI REST client and its builder.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiKey, RequestDecorator, SecuritySource, configure};
use crate::config::{ClientConfig, template_url};
use crate::error::{ApiError, CoinApiError};
use crate::hooks::{
    AfterErrorHook, AfterSuccessHook, BeforeRequestHook, HookContext, Hooks, SdkInitHook,
};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::request::{Accept, Operation, build_request};
use crate::response::{API_ERROR_MESSAGE, ApiResponse, decode, is_error_status};

/// The CoinAPI market data REST client.
///
/// Every endpoint method builds a request struct and hands it to
/// [`execute`](CoinApiClient::execute), which runs the full pipeline:
/// request building, security, hooks, transport and decoding.
///
/// # Example
///
/// ```rust,no_run
/// use coinapi_rest::CoinApiClient;
/// use coinapi_rest::rest::exchange_rates::SpecificRateRequest;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinApiClient::new("my-api-key");
///
///     let response = client
///         .get_specific_rate(&SpecificRateRequest::new("BTC", "USD"))
///         .await?;
///     if let Some(rate) = response.content() {
///         println!("1 BTC = {} USD", rate.rate);
///     }
///
///     Ok(())
/// }
/// ```
///
/// Credentials can also come from a provider that is asked again for every
/// request:
///
/// ```rust,no_run
/// use coinapi_rest::CoinApiClient;
///
/// let client = CoinApiClient::builder()
///     .api_key_provider(|| std::env::var("COINAPI_KEY").unwrap_or_default())
///     .build();
/// ```
#[derive(Clone)]
pub struct CoinApiClient {
    config: Arc<ClientConfig>,
    hooks: Arc<Hooks>,
}

impl CoinApiClient {
    /// Create a client authenticating with a static API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder.
    pub fn builder() -> CoinApiClientBuilder {
        CoinApiClientBuilder::new()
    }

    /// The effective configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute an operation.
    ///
    /// `accept` overrides the default weighted `Accept` header.
    ///
    /// Errors from building the request or resolving security are returned
    /// before any hook runs. Transport failures and 4XX/5XX responses pass
    /// through the after-error hooks, which may recover with a response.
    /// Decoding errors are returned directly.
    pub async fn execute<O: Operation>(
        &self,
        operation: &O,
        accept: Option<Accept>,
    ) -> Result<ApiResponse<O::Output>, CoinApiError> {
        let security_source = self.config.security.clone();
        let ctx = HookContext::new(O::OPERATION_ID, security_source.clone());

        let base_url = self.config.server_details()?;
        let request = build_request(operation, &base_url, &self.config.user_agent, accept)?;
        let security = security_source.as_ref().map(SecuritySource::resolve);
        let decorator = configure(security.as_ref())?;
        let transport = self.transport()?;

        tracing::debug!(
            operation = O::OPERATION_ID,
            method = %request.method,
            url = %request.url,
            "Dispatching request"
        );

        let sent = match self.hooks.before_request(&ctx, request) {
            Ok(request) => self.send(&decorator, transport.as_ref(), request).await,
            Err(error) => Err(error),
        };

        let response = match sent {
            Ok(response) if is_error_status(response.status) => {
                tracing::debug!(
                    operation = O::OPERATION_ID,
                    status = %response.status,
                    "Error status received"
                );
                let error = ApiError::new(API_ERROR_MESSAGE, response.clone());
                self.recover(&ctx, Some(response), error.into())?
            }
            Ok(response) => {
                tracing::debug!(
                    operation = O::OPERATION_ID,
                    status = %response.status,
                    "Response received"
                );
                self.hooks.after_success(&ctx, response)?
            }
            Err(error) => self.recover(&ctx, None, error)?,
        };

        decode(response)
    }

    async fn send(
        &self,
        decorator: &RequestDecorator,
        transport: &dyn HttpTransport,
        mut request: HttpRequest,
    ) -> Result<HttpResponse, CoinApiError> {
        decorator.apply(&mut request);
        transport.send(request).await
    }

    fn transport(&self) -> Result<Arc<dyn HttpTransport>, CoinApiError> {
        match &self.config.transport {
            Some(transport) => Ok(transport.clone()),
            None => Ok(Arc::new(ReqwestTransport::unmanaged(self.config.timeout)?)),
        }
    }

    fn recover(
        &self,
        ctx: &HookContext,
        response: Option<HttpResponse>,
        error: CoinApiError,
    ) -> Result<HttpResponse, CoinApiError> {
        tracing::warn!("Request {} failed: {}", ctx.operation_id, error);

        match self.hooks.after_error(ctx, response, Some(error))? {
            (_, Some(error)) => Err(error),
            (Some(response), None) => {
                tracing::debug!(
                    operation = ctx.operation_id,
                    status = %response.status,
                    "Hook recovered response"
                );
                Ok(response)
            }
            (None, None) => Err(CoinApiError::InvalidResponse(
                "after-error hooks cleared the error without providing a response".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for CoinApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinApiClient")
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Builder for [`CoinApiClient`].
pub struct CoinApiClientBuilder {
    config: ClientConfig,
    url_params: Option<HashMap<String, String>>,
    hooks: Hooks,
}

impl CoinApiClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            url_params: None,
            hooks: Hooks::new(),
        }
    }

    /// Authenticate with a static API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.security = Some(ApiKey::new(api_key).into());
        self
    }

    /// Authenticate with an API key fetched before every request.
    pub fn api_key_provider(
        mut self,
        provider: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.config.security = Some(SecuritySource::provider(move || {
            ApiKey::new(provider()).to_security()
        }));
        self
    }

    /// Use an arbitrary security descriptor or provider.
    pub fn security(mut self, security: impl Into<SecuritySource>) -> Self {
        self.config.security = Some(security.into());
        self
    }

    /// Set the server URL (useful for testing with a mock server).
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server_url = Some(url.into());
        self
    }

    /// Values substituted into `{name}` placeholders of the server URL.
    pub fn url_params(mut self, params: HashMap<String, String>) -> Self {
        self.url_params = Some(params);
        self
    }

    /// Pick one of the default servers by index.
    pub fn server_idx(mut self, idx: usize) -> Self {
        self.config.server_idx = idx;
        self
    }

    /// Share one transport between all calls.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    /// Set the timeout of transports created by the client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Register an init hook.
    pub fn sdk_init_hook(mut self, hook: impl SdkInitHook + 'static) -> Self {
        self.hooks.register_sdk_init_hook(hook);
        self
    }

    /// Register a before-request hook.
    pub fn before_request_hook(mut self, hook: impl BeforeRequestHook + 'static) -> Self {
        self.hooks.register_before_request_hook(hook);
        self
    }

    /// Register an after-success hook.
    pub fn after_success_hook(mut self, hook: impl AfterSuccessHook + 'static) -> Self {
        self.hooks.register_after_success_hook(hook);
        self
    }

    /// Register an after-error hook.
    pub fn after_error_hook(mut self, hook: impl AfterErrorHook + 'static) -> Self {
        self.hooks.register_after_error_hook(hook);
        self
    }

    /// Build the client, running the init hooks once.
    pub fn build(self) -> CoinApiClient {
        let mut config = self.config;

        if let (Some(url), Some(params)) =
            (config.server_url.as_deref(), self.url_params.as_ref())
        {
            config.server_url = Some(template_url(url, params));
        }

        // An invalid server index stays an error for every call unless a hook
        // supplies a URL.
        let base_url = config.server_details().unwrap_or_default();
        let (server_url, transport) =
            self.hooks.sdk_init(base_url.clone(), config.transport.take());
        if server_url != base_url {
            config.server_url = Some(server_url);
        }
        config.transport = transport;

        CoinApiClient {
            config: Arc::new(config),
            hooks: Arc::new(self.hooks),
        }
    }
}

impl Default for CoinApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
