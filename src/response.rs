//! Response decoding and content negotiation.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, CoinApiError};
use crate::http::HttpResponse;
use crate::rate_limit::RateLimitHeaders;

/// Message of the error raised for 4XX/5XX responses.
pub const API_ERROR_MESSAGE: &str = "API error occurred";

/// The decoded payload of a response. At most one representation is present.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    /// JSON content decoded into the operation's output type.
    Content(T),
    /// `text/plain` content.
    Plain(String),
    /// `application/x-msgpack` content, left undecoded.
    Bytes(Vec<u8>),
    /// No payload, e.g. for 3XX responses.
    Empty,
}

/// A decoded response.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// HTTP status.
    pub status_code: StatusCode,
    /// Value of the `Content-Type` header.
    pub content_type: String,
    /// The transport response.
    pub raw_response: HttpResponse,
    /// The negotiated payload.
    pub payload: Payload<T>,
}

impl<T> ApiResponse<T> {
    /// Decoded JSON content.
    pub fn content(&self) -> Option<&T> {
        match &self.payload {
            Payload::Content(content) => Some(content),
            _ => None,
        }
    }

    /// Take the decoded JSON content.
    pub fn into_content(self) -> Option<T> {
        match self.payload {
            Payload::Content(content) => Some(content),
            _ => None,
        }
    }

    /// Plain-text content.
    pub fn content_plain(&self) -> Option<&str> {
        match &self.payload {
            Payload::Plain(text) => Some(text),
            _ => None,
        }
    }

    /// Raw msgpack bytes.
    pub fn body(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Rate-limit headers reported by the server.
    pub fn rate_limit(&self) -> RateLimitHeaders {
        RateLimitHeaders::from_headers(&self.raw_response.headers)
    }
}

/// Check a `Content-Type` value against a pattern.
///
/// An empty pattern, `*` and `*/*` match anything. Otherwise the media type
/// (parameters stripped) must equal the pattern or match a `type/*` or
/// `*/subtype` wildcard.
pub fn match_content_type(content_type: &str, pattern: &str) -> bool {
    if pattern.is_empty() || pattern == "*" || pattern == "*/*" || pattern == content_type {
        return true;
    }

    let media_type = media_type(content_type);
    let pattern = pattern.to_ascii_lowercase();
    if media_type == pattern {
        return true;
    }

    match media_type.split_once('/') {
        Some((top, sub)) => pattern == format!("{top}/*") || pattern == format!("*/{sub}"),
        None => false,
    }
}

/// Media type without parameters, lowercased. Malformed values count as
/// `text/plain`.
fn media_type(content_type: &str) -> String {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if media_type.matches('/').count() == 1 {
        media_type
    } else {
        "text/plain".to_string()
    }
}

/// Check a status code against codes such as `"404"` or classes such as `"4XX"`.
pub fn match_status_codes<S: AsRef<str>>(status_codes: &[S], status_code: u16) -> bool {
    let status = status_code.to_string();
    status_codes.iter().any(|code| {
        let code = code.as_ref();
        code == status
            || (code.ends_with("XX") && code.len() == 3 && status.get(..1) == code.get(..1))
    })
}

/// Whether a response must be treated as an API error.
pub fn is_error_status(status: StatusCode) -> bool {
    match_status_codes(&["4XX", "5XX"], status.as_u16())
}

/// Decode a response into an [`ApiResponse`].
///
/// 4XX/5XX statuses become [`ApiError`]s. 2XX responses fill exactly one
/// payload slot according to their content type.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>, CoinApiError> {
    if is_error_status(response.status) {
        return Err(ApiError::new(API_ERROR_MESSAGE, response).into());
    }

    let content_type = response.content_type().to_string();
    let payload = if response.status.is_success() {
        if match_content_type(&content_type, "text/plain") {
            Payload::Plain(response.text())
        } else if match_content_type(&content_type, "application/json")
            || match_content_type(&content_type, "text/json")
        {
            let content = serde_json::from_slice(&response.body).map_err(|source| {
                CoinApiError::Deserialize {
                    status: response.status.as_u16(),
                    body: response.text(),
                    source,
                }
            })?;
            Payload::Content(content)
        } else if match_content_type(&content_type, "application/x-msgpack") {
            Payload::Bytes(response.body.clone())
        } else {
            let message = format!("unknown content-type received: {content_type}");
            return Err(ApiError::new(message, response).into());
        }
    } else {
        Payload::Empty
    };

    Ok(ApiResponse {
        status_code: response.status,
        content_type,
        raw_response: response,
        payload,
    })
}
