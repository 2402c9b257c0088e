//! Typed error taxonomy for AI service calls.
//!
//! Each collaborator failure is classified at its source into one of
//! these variants; retryability is a property of the variant, never of
//! the message text.

/// An error from an identification or care-generation call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AiError {
    /// The service could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The call exceeded its deadline. The message always mentions the
    /// deadline so clients can surface it directly.
    #[error("{0}")]
    Timeout(String),

    /// The submitted photo is unusable; retrying cannot help.
    #[error("Invalid file: {0}")]
    InvalidFile(String),

    /// The service answered with an error.
    #[error("Service error: {0}")]
    Api(String),

    /// The caller abandoned the operation.
    #[error("Request was cancelled")]
    Cancelled,

    /// Anything else. Treated as transient.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl AiError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Transient failures (network, timeout, service, unknown) are
    /// retryable; a bad file or an explicit cancellation is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::Api(_) | Self::Unknown(_) => true,
            Self::InvalidFile(_) | Self::Cancelled => false,
        }
    }

    /// Build the timeout variant for a deadline in milliseconds.
    pub fn timed_out(timeout_ms: u64) -> Self {
        Self::Timeout(format!(
            "The operation took too long (deadline: {timeout_ms} ms)"
        ))
    }
}
