//! Client error types
//!
//! Transport failures (connect, timeout, non-success status) are a different
//! failure class than contract violations (the service answered 2xx but in an
//! unexpected shape). Orchestration treats the former as availability
//! problems and the latter as fatal assumption breaks, so the distinction is
//! encoded here rather than inferred from strings.

/// Errors produced by [`PrismClient`](crate::PrismClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// The service answered successfully but violated the assumed API
    /// contract (e.g. an upload acknowledgment for a different file count).
    #[error("upstream contract violation: {0}")]
    Contract(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
