//! Error taxonomy for the inference call.
//!
//! Provides classification into retryable and terminal failures, and the
//! cloneable [`AnalysisFailure`] projection kept in the view state.

use thiserror::Error;

/// Errors that can occur while analysing an image.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No API key available
    #[error("Inference backend not configured: {reason}")]
    NotConfigured { reason: String },

    /// HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Request could not be constructed from the payload
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network or connection failure during one attempt
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Upstream answered with a non-success status
    #[error("Upstream error: {status} - {message}")]
    UpstreamStatus { status: u16, message: String },

    /// Every attempt failed
    #[error("Inference call failed after {attempts} attempt(s): {last}")]
    CallExhausted {
        attempts: u32,
        #[source]
        last: Box<InferenceError>,
    },

    /// Response did not match the expected envelope or result shape
    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),
}

/// Coarse failure classification retained for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotConfigured,
    InvalidRequest,
    Transport,
    UpstreamStatus,
    CallExhausted,
    ResponseShape,
}

impl InferenceError {
    /// Whether another attempt may succeed.
    ///
    /// Only per-attempt exchange failures qualify. Every non-2xx status is
    /// treated alike.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InferenceError::Transport { .. } | InferenceError::UpstreamStatus { .. }
        )
    }

    /// Map the error variant to its failure kind.
    pub fn kind(&self) -> FailureKind {
        match self {
            InferenceError::NotConfigured { .. } | InferenceError::Client(_) => {
                FailureKind::NotConfigured
            }
            InferenceError::InvalidRequest(_) => FailureKind::InvalidRequest,
            InferenceError::Transport { .. } => FailureKind::Transport,
            InferenceError::UpstreamStatus { .. } => FailureKind::UpstreamStatus,
            InferenceError::CallExhausted { .. } => FailureKind::CallExhausted,
            InferenceError::ResponseShape(_) => FailureKind::ResponseShape,
        }
    }

    /// Get error type string for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            InferenceError::NotConfigured { .. } => "not_configured",
            InferenceError::Client(_) => "client_error",
            InferenceError::InvalidRequest(_) => "invalid_request",
            InferenceError::Transport { .. } => "transport_error",
            InferenceError::UpstreamStatus { .. } => "upstream_status_error",
            InferenceError::CallExhausted { .. } => "call_exhausted",
            InferenceError::ResponseShape(_) => "response_shape_error",
        }
    }
}

/// Failure stored in the `Error` view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&InferenceError> for AnalysisFailure {
    fn from(err: &InferenceError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
