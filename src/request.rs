//! Operation descriptors and the request builder.

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::CoinApiError;
use crate::http::HttpRequest;
use crate::serialization::{
    Body, Field, generate_url, get_headers, get_query_params, serialize_request_body,
};

/// Accept header sent when the caller does not pick a content type.
pub const DEFAULT_ACCEPT: &str =
    "application/json;q=1, text/json;q=0.8, text/plain;q=0.5, application/x-msgpack;q=0";

/// Response content types a caller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    ApplicationJson,
    TextJson,
    TextPlain,
    ApplicationXMsgpack,
    Any,
}

impl Accept {
    /// The header value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationJson => "application/json",
            Self::TextJson => "text/json",
            Self::TextPlain => "text/plain",
            Self::ApplicationXMsgpack => "application/x-msgpack",
            Self::Any => "*/*",
        }
    }
}

/// A declaratively described API operation.
///
/// Implementors are plain request structs: the associated constants name the
/// endpoint and [`fields`](Operation::fields) tags every parameter with its
/// location and serialization style.
pub trait Operation: Send + Sync {
    /// Decoded type of a JSON response.
    type Output: DeserializeOwned;

    /// Operation identifier handed to hooks.
    const OPERATION_ID: &'static str;
    /// HTTP method.
    const METHOD: Method;
    /// Path template with `{name}` placeholders.
    const PATH: &'static str;

    /// Path, query and header fields in declaration order.
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    /// Request body, if the operation sends one.
    fn body(&self) -> Result<Option<Body>, CoinApiError> {
        Ok(None)
    }
}

/// Build the outgoing request for an operation.
///
/// Security is not applied here; the client decorates the request after the
/// before-request hooks ran.
pub fn build_request<O: Operation>(
    operation: &O,
    base_url: &str,
    user_agent: &str,
    accept: Option<Accept>,
) -> Result<HttpRequest, CoinApiError> {
    let fields = operation.fields();
    let url = generate_url(base_url, O::PATH, &fields)?;
    Url::parse(&url)?;

    let mut headers = HeaderMap::new();
    for (name, value) in get_headers(&fields)? {
        headers.insert(header_name(&name)?, header_value(&value)?);
    }

    // Only POST, PUT and PATCH carry a body.
    let body = match operation.body()? {
        Some(body) if has_body(&O::METHOD) => Some(serialize_request_body(&body)?),
        _ => None,
    };

    if let Some(body) = &body {
        if !is_multipart(&body.media_type) {
            headers.insert(CONTENT_TYPE, header_value(&body.media_type)?);
        }
    }

    let accept = accept.map_or(DEFAULT_ACCEPT, |accept| accept.as_str());
    headers.insert(ACCEPT, HeaderValue::from_static(accept));
    headers.insert(USER_AGENT, header_value(user_agent)?);

    Ok(HttpRequest {
        method: O::METHOD,
        url,
        query: get_query_params(&fields)?,
        headers,
        body: body.map(|body| body.body),
    })
}

fn has_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn is_multipart(media_type: &str) -> bool {
    let media_type = media_type.to_ascii_lowercase();
    media_type.starts_with("multipart/form-data") || media_type.starts_with("multipart/mixed")
}

fn header_name(name: &str) -> Result<HeaderName, CoinApiError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| CoinApiError::InvalidHeader(format!("{name}: {e}")))
}

fn header_value(value: &str) -> Result<HeaderValue, CoinApiError> {
    HeaderValue::from_str(value).map_err(|e| CoinApiError::InvalidHeader(e.to_string()))
}
