//! Error types for the store layer
//!
//! Provides error handling for:
//! - Transport failures talking to the backend
//! - Non-success responses
//! - Responses that do not match the expected wire contract

/// Store layer error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP transport failed
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("{target} returned status {status}: {body}")]
    Status {
        /// Endpoint or rpc name
        target: String,
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Response payload did not match the wire contract
    #[error("failed to decode {target}: {source}")]
    Decode {
        /// Endpoint or rpc name
        target: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Response had the wrong overall shape (object vs. array)
    #[error("unexpected response shape from {target}: expected {expected}")]
    UnexpectedShape {
        /// Endpoint or rpc name
        target: String,
        /// Shape the contract requires
        expected: &'static str,
    },

    /// Request parameter could not be serialized
    #[error("failed to encode {param} for {target}: {source}")]
    Encode {
        /// Endpoint or rpc name
        target: String,
        /// Parameter name
        param: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// No such endpoint
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// No such remote procedure
    #[error("unknown rpc: {0}")]
    UnknownRpc(String),

    /// Backend reported a query failure
    #[error("backend error: {0}")]
    Backend(String),

    /// Request exceeded its deadline
    #[error("request timed out after {duration_secs}s")]
    Timeout {
        /// Deadline that was exceeded
        duration_secs: u64,
    },

    /// Configured base URL is unusable
    #[error("invalid base url: '{0}'")]
    InvalidUrl(String),
}

impl StoreError {
    /// Whether another attempt might succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => !e.is_builder() && !e.is_decode(),
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Backend(_) | Self::Timeout { .. } => true,
            Self::Decode { .. }
            | Self::Encode { .. }
            | Self::UnexpectedShape { .. }
            | Self::UnknownEndpoint(_)
            | Self::UnknownRpc(_)
            | Self::InvalidUrl(_) => false,
        }
    }

    /// Create decode error for a target
    pub fn decode(target: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            target: target.into(),
            source,
        }
    }

    /// Create encode error for a request parameter
    pub fn encode(
        target: impl Into<String>,
        param: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Encode {
            target: target.into(),
            param: param.into(),
            source,
        }
    }

    /// Create status error for a target
    pub fn status(target: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            target: target.into(),
            status,
            body: body.into(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
