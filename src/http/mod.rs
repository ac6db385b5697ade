//! Transport boundary types.
//!
//! The pipeline produces an [`HttpRequest`] and consumes an [`HttpResponse`];
//! anything implementing [`HttpTransport`] can sit in between.

mod transport;

pub use transport::{HttpTransport, ReqwestTransport};

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::error::CoinApiError;

/// An encoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Url-encoded form pairs.
    Form(Vec<(String, String)>),
    /// Multipart parts; the transport sets the boundary.
    Multipart(Vec<MultipartPart>),
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    /// Part name.
    pub name: String,
    /// File name for file parts.
    pub file_name: Option<String>,
    /// Explicit part content type.
    pub content_type: Option<String>,
    /// Part payload.
    pub data: Vec<u8>,
}

impl MultipartPart {
    /// A plain text part.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: value.into().into_bytes(),
        }
    }
}

/// A fully built outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// URL without the query string.
    pub url: String,
    /// Ordered query pairs.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Encoded body.
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    /// The URL with the query pairs appended.
    pub fn full_url(&self) -> Result<Url, CoinApiError> {
        let mut url = Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }

    /// Look up the first query value for a key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A fully received response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// The body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// A header value, if present and valid text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `Content-Type` header, or an empty string.
    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn test_full_url_appends_query() {
        let request = HttpRequest {
            method: Method::GET,
            url: "https://rest.coinapi.io/v1/assets".to_string(),
            query: vec![
                ("filter_asset_id".to_string(), "BTC".to_string()),
                ("filter_asset_id".to_string(), "ETH".to_string()),
                ("time".to_string(), "2024-01-01T00:00:00Z".to_string()),
            ],
            headers: HeaderMap::new(),
            body: None,
        };
        let url = request.full_url().unwrap();
        assert_eq!(
            url.as_str(),
            concat!(
                "https://rest.coinapi.io/v1/assets",
                "?filter_asset_id=BTC&filter_asset_id=ETH&time=2024-01-01T00%3A00%3A00Z"
            )
        );
        assert_eq!(request.query_value("filter_asset_id"), Some("BTC"));
    }

    #[test]
    fn test_response_accessors() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        let response = HttpResponse {
            status: StatusCode::OK,
            headers,
            body: b"hello".to_vec(),
        };
        assert_eq!(response.text(), "hello");
        assert_eq!(response.content_type(), "text/plain; charset=utf-8");
        assert_eq!(response.header("x-missing"), None);
    }
}
