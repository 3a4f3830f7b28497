//! Error types for the Tableau Server client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Invalid filter field '{field}' for {resource}")]
    InvalidFilterField { resource: String, field: String },

    #[error("Invalid filter operator '{operator}' for field '{field}'")]
    InvalidOperator { field: String, operator: String },

    #[error("Invalid sort field '{field}' for {resource}")]
    InvalidSortField { resource: String, field: String },

    #[error("Page size must be between 1 and 1000, got {page_size}")]
    InvalidPageSize { page_size: i64 },

    #[error("Filters must be given as field=value, got positional argument '{value}'")]
    PositionalFilterArgument { value: String },

    #[error("Missing required field: {field}")]
    MissingRequiredField { field: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // ============================================================================
    // Capability Errors
    // ============================================================================
    #[error("{operation} requires REST API version {required}, server is on {current}")]
    EndpointUnavailable {
        operation: String,
        required: String,
        current: String,
    },

    #[error("Invalid API version: '{version}'")]
    InvalidVersion { version: String },

    // ============================================================================
    // Session Errors
    // ============================================================================
    #[error("Not signed in: {message}")]
    NotSignedIn { message: String },

    #[error("Sign in failed: {message}")]
    FailedSignIn { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error {code} (HTTP {status}): {summary}: {detail}")]
    ServerResponse {
        status: u16,
        code: String,
        summary: String,
        detail: String,
    },

    #[error("HTTP {status}: non-XML response: {body}")]
    NonXmlResponse { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Server reported {expected} items but returned an empty page after {received}")]
    CountMismatch { expected: u64, received: u64 },

    // ============================================================================
    // Parsing Errors
    // ============================================================================
    #[error("XML parsing error: {message}")]
    XmlParse { message: String },

    #[error("XML writing error: {message}")]
    XmlWrite { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Configuration / I/O Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not-signed-in error
    pub fn not_signed_in(message: impl Into<String>) -> Self {
        Self::NotSignedIn {
            message: message.into(),
        }
    }

    /// Create an XML parse error
    pub fn xml_parse(message: impl Into<String>) -> Self {
        Self::XmlParse {
            message: message.into(),
        }
    }

    /// Create an XML write error
    pub fn xml_write(message: impl Into<String>) -> Self {
        Self::XmlWrite {
            message: message.into(),
        }
    }

    /// Server error code, if this error came back from the server
    pub fn server_code(&self) -> Option<&str> {
        match self {
            Error::ServerResponse { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// Whether the error was raised locally before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidFilterField { .. }
                | Error::InvalidOperator { .. }
                | Error::InvalidSortField { .. }
                | Error::InvalidPageSize { .. }
                | Error::PositionalFilterArgument { .. }
                | Error::MissingRequiredField { .. }
                | Error::InvalidArgument { .. }
        )
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidFilterField {
            resource: "users".into(),
            field: "bogus_field".into(),
        };
        assert_eq!(err.to_string(), "Invalid filter field 'bogus_field' for users");

        let err = Error::InvalidPageSize { page_size: 1001 };
        assert_eq!(
            err.to_string(),
            "Page size must be between 1 and 1000, got 1001"
        );

        let err = Error::EndpointUnavailable {
            operation: "sites.encrypt_extracts".into(),
            required: "3.5".into(),
            current: "2.0".into(),
        };
        assert_eq!(
            err.to_string(),
            "sites.encrypt_extracts requires REST API version 3.5, server is on 2.0"
        );
    }

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(status), "{status} should retry");
        }
        for status in [400, 401, 403, 404, 409, 501] {
            assert!(!is_retryable_status(status), "{status} should not retry");
        }
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::InvalidPageSize { page_size: 0 }.is_validation());
        assert!(Error::PositionalFilterArgument { value: "x".into() }.is_validation());
        assert!(!Error::not_signed_in("no token").is_validation());
    }

    #[test]
    fn test_server_code() {
        let err = Error::ServerResponse {
            status: 404,
            code: "404008".into(),
            summary: "s".into(),
            detail: "d".into(),
        };
        assert_eq!(err.server_code(), Some("404008"));
        assert_eq!(Error::config("x").server_code(), None);
    }
}
