//! OAuth2 Error Types
//!
//! Error hierarchy for configuration, transport and token endpoint failures.

use std::time::Duration;
use thiserror::Error;

/// Root error type for the OAuth2 client.
#[derive(Error, Debug)]
pub enum OAuth2Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Invalid token type: {token_type} (expected access_token or refresh_token)")]
    InvalidTokenType { token_type: String },
}

impl OAuth2Error {
    /// Get error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "OAUTH2_VALIDATION",
            Self::Http(_) => "OAUTH2_HTTP",
            Self::Network(_) => "OAUTH2_NETWORK",
            Self::Protocol(_) => "OAUTH2_PROTOCOL",
            Self::InvalidTokenType { .. } => "OAUTH2_INVALID_TOKEN_TYPE",
        }
    }

    /// HTTP status of the failed response, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => Some(e.status),
            _ => None,
        }
    }

    /// Whether the authorization server rejected the request (as opposed to being unreachable).
    pub fn is_server_rejection(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_client_error())
    }
}

/// Configuration or token payload failed validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("Invalid token payload: {message}")]
    InvalidToken { message: String },

    #[error("Token has no {token_type}")]
    MissingToken { token_type: String },
}

impl ValidationError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Authorization server answered with status >= 400.
#[derive(Error, Debug, Clone)]
#[error("status {status}{}", describe_body(.body))]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Response body, when it was valid JSON.
    pub body: Option<serde_json::Value>,
}

fn describe_body(body: &Option<serde_json::Value>) -> String {
    body.as_ref()
        .and_then(|b| serde_json::from_value::<OAuth2ErrorResponse>(b.clone()).ok())
        .map(|e| match e.error_description {
            Some(desc) => format!(": {} ({})", e.error, desc),
            None => format!(": {}", e.error),
        })
        .unwrap_or_default()
}

impl HttpError {
    /// Decode the body as an RFC 6749 §5.2 error response.
    pub fn error_response(&self) -> Option<OAuth2ErrorResponse> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::from_value(b.clone()).ok())
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/// Network/transport error.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timeout after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Too many redirects (limit {max})")]
    TooManyRedirects { max: usize },
}

/// Response could not be understood.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Response too large: {size} bytes")]
    ResponseTooLarge { size: usize },

    #[error("Invalid JSON in successful response: {message}")]
    InvalidJson { message: String },
}

/// Result type for OAuth2 operations.
pub type OAuth2Result<T> = Result<T, OAuth2Error>;

/// OAuth2 error response from provider.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct OAuth2ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error_uri: Option<String>,
}

/// Parse error response from HTTP body.
pub fn parse_error_response(body: &str) -> Option<OAuth2ErrorResponse> {
    serde_json::from_str(body).ok()
}

/// Create error from a failed HTTP response. The body is kept only when it parses as JSON.
pub fn create_error_from_response(status: u16, body: &str) -> OAuth2Error {
    let body = serde_json::from_str::<serde_json::Value>(body).ok();
    OAuth2Error::Http(HttpError { status, body })
}
