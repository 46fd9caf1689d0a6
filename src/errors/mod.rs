//! Error types for the Facebook Graph client.
//!
//! Every failure is surfaced to the immediate caller as a typed error.
//! Nothing here is retried internally; [`GraphError::is_retryable`] only
//! classifies errors for the hosting application.

use std::fmt;
use thiserror::Error;

/// Result type for Graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Root error type for the Graph client
#[derive(Error, Debug)]
pub enum GraphError {
    /// Missing or invalid setting
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Authorization code exchange failed
    #[error("Token exchange error: {0}")]
    TokenExchange(#[from] TokenExchangeError),

    /// Transport-level failure on an authenticated GET
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Response body could not be interpreted
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Expected data absent from a well-formed response
    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Field outside the configured projection
    #[error("Unknown field: {0}")]
    UnknownField(#[from] UnknownFieldError),

    /// User projection built without a usable token or code
    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),
}

impl GraphError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "GRAPH_CONFIG",
            Self::TokenExchange(_) => "GRAPH_TOKEN_EXCHANGE",
            Self::Request(_) => "GRAPH_REQUEST",
            Self::Parse(_) => "GRAPH_PARSE",
            Self::NotFound(_) => "GRAPH_NOT_FOUND",
            Self::UnknownField(_) => "GRAPH_UNKNOWN_FIELD",
            Self::Construction(_) => "GRAPH_CONSTRUCTION",
        }
    }

    /// Check if a caller could reasonably retry this error
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(RequestError::Transport(TransportError::Timeout))
            | Self::Request(RequestError::Transport(TransportError::ConnectionFailed { .. }))
            | Self::TokenExchange(TokenExchangeError::Transport(TransportError::Timeout))
            | Self::TokenExchange(TokenExchangeError::Transport(
                TransportError::ConnectionFailed { .. },
            )) => true,
            Self::Request(RequestError::Status { status, .. })
            | Self::TokenExchange(TokenExchangeError::Status { status, .. }) => {
                *status == 429 || *status >= 500
            }
            _ => false,
        }
    }

    /// Get the HTTP status returned by the Graph API, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Request(RequestError::Status { status, .. })
            | Self::TokenExchange(TokenExchangeError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required setting is unset or empty
    #[error("Setting '{0}' is not configured")]
    MissingSetting(&'static str),

    /// Unrecognized configuration key
    #[error("Unrecognized configuration key '{0}'")]
    UnrecognizedKey(String),

    /// Value of the wrong kind for a key
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key
        key: &'static str,
        /// Error message
        message: String,
    },

    /// Invalid ambient configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Transport errors reported by an [`HttpTransport`](crate::transport::HttpTransport)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Any other HTTP-level failure
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

/// Details of a Graph API error envelope (`{"error": {...}}`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiErrorDetail {
    /// Error message
    pub message: String,
    /// Error type, e.g. `OAuthException`
    pub error_type: Option<String>,
    /// Numeric error code
    pub code: Option<i64>,
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error_type, self.code) {
            (Some(kind), Some(code)) => write!(f, "{} ({} #{})", self.message, kind, code),
            (Some(kind), None) => write!(f, "{} ({})", self.message, kind),
            (None, Some(code)) => write!(f, "{} (#{})", self.message, code),
            (None, None) => f.write_str(&self.message),
        }
    }
}

/// Token exchange errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenExchangeError {
    /// The exchange call failed in transport
    #[error("Exchange request failed: {0}")]
    Transport(#[from] TransportError),

    /// The exchange endpoint answered with a non-success status
    #[error("Exchange rejected with HTTP {status}: {detail}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Decoded error detail
        detail: ApiErrorDetail,
    },

    /// The response body carried no `access_token` segment
    #[error("No access_token in exchange response")]
    MissingToken,

    /// The exchange query could not be encoded
    #[error("Failed to encode exchange query: {0}")]
    InvalidQuery(String),
}

/// Request errors on the generic authenticated GET
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Transport failure
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// Non-success HTTP status
    #[error("HTTP {status}: {detail}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Decoded error detail
        detail: ApiErrorDetail,
    },

    /// The target URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Response parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Body is not valid JSON
    #[error("Malformed JSON: {message}")]
    MalformedJson {
        /// Error message
        message: String,
    },

    /// JSON is valid but has the wrong shape
    #[error("Unexpected shape for '{field}': expected {expected}")]
    UnexpectedShape {
        /// Field being read
        field: String,
        /// Expected shape
        expected: &'static str,
    },
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::MalformedJson {
            message: err.to_string(),
        }
    }
}

/// Expected data absent from a response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    /// No album with `type == "profile"`
    #[error("No profile album")]
    ProfileAlbum,

    /// A field was missing from a response
    #[error("Field '{0}' missing from response")]
    Field(String),
}

/// Field outside the configured projection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{name}' is not a configured user field")]
pub struct UnknownFieldError {
    /// Requested field name
    pub name: String,
}

/// User projection construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// Neither an access token nor an authorization code was usable
    #[error("Either an access token or an authorization code is required")]
    MissingCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        assert!(GraphError::Request(RequestError::Transport(TransportError::Timeout))
            .is_retryable());
        assert!(GraphError::Request(RequestError::Status {
            status: 503,
            detail: ApiErrorDetail::default(),
        })
        .is_retryable());

        assert!(!GraphError::Request(RequestError::Status {
            status: 400,
            detail: ApiErrorDetail::default(),
        })
        .is_retryable());
        assert!(!GraphError::NotFound(NotFoundError::ProfileAlbum).is_retryable());
        assert!(!GraphError::TokenExchange(TokenExchangeError::MissingToken).is_retryable());
    }

    #[test]
    fn test_error_codes() {
        let err: GraphError = UnknownFieldError {
            name: "email".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "GRAPH_UNKNOWN_FIELD");

        let err: GraphError = ConfigurationError::MissingSetting("client_id").into();
        assert_eq!(err.error_code(), "GRAPH_CONFIG");
        assert_eq!(
            err.to_string(),
            "Configuration error: Setting 'client_id' is not configured"
        );
    }

    #[test]
    fn test_api_error_detail_display() {
        let detail = ApiErrorDetail {
            message: "Invalid OAuth access token.".to_string(),
            error_type: Some("OAuthException".to_string()),
            code: Some(190),
        };
        assert_eq!(
            detail.to_string(),
            "Invalid OAuth access token. (OAuthException #190)"
        );

        let err = GraphError::Request(RequestError::Status { status: 400, detail });
        assert_eq!(err.http_status(), Some(400));
    }
}
