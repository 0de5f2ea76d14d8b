//! Error type system for the Bookshelf client
//!
//! This module provides a single error type covering:
//! - Server errors carrying the HTTP status and the optional `meta.message`
//! - Transport failures and timeouts
//! - Local validation and storage failures

use reqwest::StatusCode;

/// Main error type for the Bookshelf client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Server-side errors
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http {
        status: StatusCode,
        /// Message taken from the `{ meta: { message } }` error body, if any
        message: Option<String>,
    },

    // Transport errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // Local errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of a server error, `None` for everything that never reached the server
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the request as unauthorized (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Message supplied by the server in the error body
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::Http { .. } => "Http",
            ClientError::Network(_) => "Network",
            ClientError::Timeout(_) => "Timeout",
            ClientError::Serialization(_) => "Serialization",
            ClientError::Deserialization(_) => "Deserialization",
            ClientError::Validation(_) => "Validation",
            ClientError::InvalidRequest(_) => "InvalidRequest",
            ClientError::Storage(_) => "Storage",
            ClientError::Config(_) => "Config",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Deserialization(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Http {
                status,
                message: None,
            }
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Result type alias for operations that can fail with ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ClientError::Http {
            status: StatusCode::BAD_REQUEST,
            message: Some("Invalid username".into()),
        };
        assert_eq!(err.to_string(), "HTTP 400 Bad Request: Invalid username");

        let err = ClientError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert!(err.to_string().ends_with("request failed"));
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = ClientError::Http {
            status: StatusCode::UNAUTHORIZED,
            message: None,
        };
        assert!(err.is_unauthorized());
        assert!(!ClientError::Network("down".into()).is_unauthorized());
        assert!(!ClientError::Timeout("slow".into()).is_unauthorized());
    }

    #[test]
    fn test_server_message() {
        let err = ClientError::Http {
            status: StatusCode::NOT_FOUND,
            message: Some("Book not found".into()),
        };
        assert_eq!(err.server_message(), Some("Book not found"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(ClientError::Validation("x".into()).server_message(), None);
        assert_eq!(ClientError::Validation("x".into()).status(), None);
    }

    #[test]
    fn test_error_types() {
        assert_eq!(ClientError::Timeout("t".into()).error_type(), "Timeout");
        assert_eq!(ClientError::Storage("s".into()).error_type(), "Storage");
        assert_eq!(
            ClientError::Http {
                status: StatusCode::FORBIDDEN,
                message: None
            }
            .error_type(),
            "Http"
        );
    }
}
