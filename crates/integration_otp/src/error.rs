//! Upstream planner error types

use thiserror::Error;

/// Errors that can occur while talking to OpenTripPlanner
#[derive(Debug, Error)]
pub enum OtpError {
    /// The planner refused the TCP connection (not running)
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// Any other connection-level failure
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The planner answered 404
    #[error("Upstream planner returned 404 Not Found")]
    NotFound,

    /// The planner answered with another non-success status
    #[error("Upstream planner returned {status}: {message}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Message from the upstream error body, or the status line
        message: String,
    },

    /// Failed to decode the planner response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl OtpError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionRefused(_) | Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::RequestFailed { status, .. } => *status >= 500,
            Self::NotFound | Self::ParseError(_) | Self::ConfigurationError(_) => false,
        }
    }

    /// Returns true if the planner is not reachable at all
    #[must_use]
    pub const fn is_connection_refused(&self) -> bool {
        matches!(self, Self::ConnectionRefused(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(OtpError::ConnectionRefused("test".to_string()).is_retryable());
        assert!(OtpError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(OtpError::Timeout { timeout_ms: 5000 }.is_retryable());
        assert!(
            OtpError::RequestFailed {
                status: 503,
                message: "busy".to_string()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!OtpError::NotFound.is_retryable());
        assert!(!OtpError::ParseError("test".to_string()).is_retryable());
        assert!(!OtpError::ConfigurationError("test".to_string()).is_retryable());
        assert!(
            !OtpError::RequestFailed {
                status: 400,
                message: "bad".to_string()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_connection_refused_flag() {
        assert!(OtpError::ConnectionRefused("x".to_string()).is_connection_refused());
        assert!(!OtpError::ConnectionFailed("x".to_string()).is_connection_refused());
    }

    #[test]
    fn test_error_display() {
        let err = OtpError::RequestFailed {
            status: 500,
            message: "graph not loaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Upstream planner returned 500: graph not loaded"
        );

        let err = OtpError::Timeout { timeout_ms: 10_000 };
        assert!(err.to_string().contains("10000"));
    }
}
