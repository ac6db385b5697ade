use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use super::{HttpBody, HttpRequest, HttpResponse, MultipartPart};
use crate::error::CoinApiError;

/// The I/O boundary of the client.
///
/// Implementations send one request and return the fully received response,
/// or fail on connection errors and timeouts. A transport shared between
/// calls must be safe to use concurrently.
pub trait HttpTransport: Send + Sync {
    /// Send a request.
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, CoinApiError>>;
}

/// [`HttpTransport`] backed by reqwest with tracing middleware.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    http_client: ClientWithMiddleware,
}

impl ReqwestTransport {
    /// Wrap an existing reqwest client.
    pub fn new(client: reqwest::Client) -> Self {
        let http_client = ClientBuilder::new(client.clone())
            .with(TracingMiddleware::default())
            .build();
        Self {
            client,
            http_client,
        }
    }

    /// Create a transport with a request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, CoinApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client))
    }

    /// Single-connection transport used when the caller supplies none.
    pub(crate) fn unmanaged(timeout: Duration) -> Result<Self, CoinApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(1)
            .build()?;
        Ok(Self::new(client))
    }

    fn build_request(&self, request: HttpRequest) -> Result<reqwest::Request, CoinApiError> {
        let url = request.full_url()?;
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);

        builder = match request.body {
            None => builder,
            Some(HttpBody::Bytes(bytes)) => builder.body(bytes),
            Some(HttpBody::Form(pairs)) => {
                let encoded = serde_urlencoded::to_string(&pairs).map_err(|e| {
                    CoinApiError::InvalidRequestBody {
                        media_type: "application/x-www-form-urlencoded".to_string(),
                        reason: e.to_string(),
                    }
                })?;
                builder.body(encoded)
            }
            Some(HttpBody::Multipart(parts)) => builder.multipart(multipart_form(parts)?),
        };

        Ok(builder.build()?)
    }
}

fn multipart_form(parts: Vec<MultipartPart>) -> Result<Form, CoinApiError> {
    let mut form = Form::new();
    for part in parts {
        let mut body = Part::bytes(part.data);
        if let Some(file_name) = part.file_name {
            body = body.file_name(file_name);
        }
        if let Some(content_type) = part.content_type {
            body = body.mime_str(&content_type)?;
        }
        form = form.part(part.name, body);
    }
    Ok(form)
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, CoinApiError>> {
        Box::pin(async move {
            let request = self.build_request(request)?;
            let response = self.http_client.execute(request).await?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

    use super::*;

    fn request(body: Option<HttpBody>) -> HttpRequest {
        let mut headers = HeaderMap::new();
        headers.insert("X-CoinAPI-Key", HeaderValue::from_static("secret123"));
        HttpRequest {
            method: Method::POST,
            url: "https://rest.coinapi.io/v1/indexes".to_string(),
            query: vec![("limit".to_string(), "10".to_string())],
            headers,
            body,
        }
    }

    #[test]
    fn test_build_request_with_bytes() {
        let transport = ReqwestTransport::new(reqwest::Client::new());
        let built = transport
            .build_request(request(Some(HttpBody::Bytes(b"{}".to_vec()))))
            .unwrap();
        assert_eq!(built.method(), &Method::POST);
        assert_eq!(built.url().as_str(), "https://rest.coinapi.io/v1/indexes?limit=10");
        assert_eq!(built.headers()["X-CoinAPI-Key"], "secret123");
        assert_eq!(built.body().and_then(|b| b.as_bytes()), Some(&b"{}"[..]));
    }

    #[test]
    fn test_build_request_with_form() {
        let transport = ReqwestTransport::new(reqwest::Client::new());
        let pairs = vec![("name".to_string(), "my index".to_string())];
        let built = transport
            .build_request(request(Some(HttpBody::Form(pairs))))
            .unwrap();
        assert_eq!(built.body().and_then(|b| b.as_bytes()), Some(&b"name=my+index"[..]));
    }

    #[test]
    fn test_build_request_with_multipart() {
        let transport = ReqwestTransport::new(reqwest::Client::new());
        let parts = vec![MultipartPart::text("name", "idx")];
        let built = transport
            .build_request(request(Some(HttpBody::Multipart(parts))))
            .unwrap();
        let content_type = built.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }
}
