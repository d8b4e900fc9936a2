//! Error types module
//!
//! This module provides the core error types used throughout the gateway.
//! All errors are unified under the `AppError` enum, which distinguishes
//! request validation failures, upstream transport failures, and upstream
//! contract violations (the photo service answering in an unexpected shape).

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like upstream availability
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPSTREAM_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport or availability failure talking to the photo service
    /// (connection refused, timeout, non-success status).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The photo service answered, but in a shape that violates the assumed
    /// contract (wrong acknowledgment text, wrong match counts). Never retried.
    #[error("Upstream contract violation: {0}")]
    UpstreamContract(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

// Error conversion implementations following Rust best practices
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in the ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce the total upload size and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            None,
            false,
            LogLevel::Debug,
        ),
        AppError::Upstream(_) => (
            502,
            "UPSTREAM_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Warn,
        ),
        AppError::UpstreamContract(_) => (
            502,
            "UPSTREAM_CONTRACT_ERROR",
            false,
            Some("Contact the operator if this error persists"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            false,
            Some("Contact support if this error persists"),
            true,
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => format!("Invalid input: {}", msg),
            AppError::PayloadTooLarge(msg) => format!("Payload too large: {}", msg),
            AppError::NotFound(msg) => format!("Not found: {}", msg),
            // Upstream detail can leak service internals; keep the client text generic.
            AppError::Upstream(_) => "Photo service unavailable".to_string(),
            AppError::UpstreamContract(_) => "Photo service returned an unexpected response".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }
}

impl AppError {
    /// Error type name for structured logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::NotFound(_) => "NotFound",
            AppError::Upstream(_) => "Upstream",
            AppError::UpstreamContract(_) => "UpstreamContract",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "InternalWithSource",
        }
    }

    /// Full internal message, including sources, for non-production detail output.
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InternalWithSource { message, source } => {
                format!("{}: {:#}", message, source)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_400() {
        let err = AppError::InvalidInput("bad sort".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(!err.is_recoverable());
        assert!(!err.is_sensitive());
    }

    #[test]
    fn upstream_transport_is_recoverable_contract_violation_is_not() {
        let transport = AppError::Upstream("connect refused".to_string());
        assert_eq!(transport.http_status_code(), 502);
        assert!(transport.is_recoverable());

        let contract = AppError::UpstreamContract("2 files uploaded".to_string());
        assert_eq!(contract.http_status_code(), 502);
        assert!(!contract.is_recoverable());
    }

    #[test]
    fn upstream_client_message_hides_detail() {
        let err = AppError::Upstream("http://10.0.0.3:2342 refused".to_string());
        assert!(!err.client_message().contains("10.0.0.3"));
    }

    #[test]
    fn detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("connection reset").context("session request failed");
        let err = AppError::InternalWithSource {
            message: "startup failed".to_string(),
            source,
        };
        let detail = err.detailed_message();
        assert!(detail.contains("startup failed"));
        assert!(detail.contains("session request failed"));
    }
}
