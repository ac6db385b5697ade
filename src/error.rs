//! Error types for the CoinAPI client library.

use thiserror::Error;

use crate::auth::{SchemeType, SubType};
use crate::http::HttpResponse;
use crate::serialization::Style;

/// The main error type for all CoinAPI client operations.
#[derive(Error, Debug)]
pub enum CoinApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with a 4XX/5XX status or an unexpected content type
    #[error("{0}")]
    Api(ApiError),

    /// A success response body did not match the declared response shape
    #[error("Failed to decode response (status {status}): {source}. Body: {body}")]
    Deserialize {
        /// HTTP status of the response
        status: u16,
        /// Response text
        body: String,
        /// Underlying decoder error
        #[source]
        source: serde_json::Error,
    },

    /// The security descriptor uses a scheme this client cannot apply
    #[error("security scheme {scheme_type:?}/{sub_type:?} is not supported")]
    UnsupportedSecurityScheme {
        /// Scheme type of the offending field
        scheme_type: SchemeType,
        /// Scheme sub-type of the offending field
        sub_type: SubType,
    },

    /// A multipart file field is missing its name or content
    #[error("Invalid multipart/form-data file: field `{field}`")]
    InvalidMultipartFile {
        /// Name of the multipart field
        field: String,
    },

    /// The request body cannot be encoded for its media type
    #[error("invalid request body type for mediaType {media_type}: {reason}")]
    InvalidRequestBody {
        /// Declared media type
        media_type: String,
        /// What went wrong
        reason: String,
    },

    /// A field uses a serialization style its location does not support
    #[error("unsupported {style:?} style for field `{field}`")]
    UnsupportedStyle {
        /// Field name
        field: String,
        /// Declared style
        style: Style,
    },

    /// A field value cannot be serialized with its declared style
    #[error("cannot serialize field `{field}`: {reason}")]
    UnsupportedParameter {
        /// Field name
        field: String,
        /// What went wrong
        reason: String,
    },

    /// A header name or value is not valid HTTP
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Client configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid response from the pipeline
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Error raised by a registered hook
    #[error("hook error: {0}")]
    Hook(Box<dyn std::error::Error + Send + Sync>),
}

impl CoinApiError {
    /// HTTP status attached to this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status_code),
            Self::Deserialize { status, .. } => Some(*status),
            Self::Http(error) => error.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a structured API error.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Check if this error comes from a broken request descriptor or client setup.
    ///
    /// These are never routed through hooks.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedSecurityScheme { .. }
                | Self::InvalidMultipartFile { .. }
                | Self::InvalidRequestBody { .. }
                | Self::UnsupportedStyle { .. }
                | Self::UnsupportedParameter { .. }
                | Self::InvalidHeader(_)
                | Self::Url(_)
                | Self::Config(_)
        )
    }
}

/// Error returned when the API answers with an error status or an
/// undecodable content type.
///
/// Carries the raw response so callers can log or re-render without
/// re-parsing.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Human-readable error message
    pub message: String,
    /// HTTP status code
    pub status_code: u16,
    /// Response body text
    pub body: String,
    /// The full transport response
    pub raw_response: HttpResponse,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: Status {}", self.message, self.status_code)?;
        if !self.body.is_empty() {
            write!(f, "\n{}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create an API error from a message and the offending response.
    pub fn new(message: impl Into<String>, raw_response: HttpResponse) -> Self {
        Self {
            message: message.into(),
            status_code: raw_response.status.as_u16(),
            body: raw_response.text(),
            raw_response,
        }
    }

    /// Check if the server rejected the request because of rate limiting.
    pub fn is_rate_limit(&self) -> bool {
        self.status_code == 429
    }

    /// Check if the API key was missing or rejected.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401 || self.status_code == 403
    }

    /// Check if this is a server-side failure.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }
}

impl From<ApiError> for CoinApiError {
    fn from(error: ApiError) -> Self {
        Self::Api(error)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use reqwest::header::HeaderMap;

    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new("API error occurred", response(404, "{\"error\":\"nope\"}"));
        assert_eq!(error.to_string(), "API error occurred: Status 404\n{\"error\":\"nope\"}");
    }

    #[test]
    fn test_api_error_display_without_body() {
        let error = ApiError::new("API error occurred", response(500, ""));
        assert_eq!(error.to_string(), "API error occurred: Status 500");
        assert!(error.is_server_error());
    }

    #[test]
    fn test_error_classification() {
        let api: CoinApiError = ApiError::new("API error occurred", response(429, "")).into();
        assert!(api.is_api_error());
        assert_eq!(api.status_code(), Some(429));
        assert!(!api.is_configuration_error());

        let config = CoinApiError::InvalidMultipartFile {
            field: "file".to_string(),
        };
        assert!(config.is_configuration_error());
        assert_eq!(config.status_code(), None);
    }
}
