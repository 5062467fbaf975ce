//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No API key configured
    #[error("API key not configured")]
    MissingApiKey,

    /// Failed to connect to inference server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to inference server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The model refused to answer or returned no candidates
    #[error("Response blocked: {0}")]
    Blocked(String),

    /// Timeout during inference
    #[error("Inference timeout")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InferenceError::Timeout
        } else if err.is_connect() {
            InferenceError::ConnectionFailed(err.to_string())
        } else {
            InferenceError::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            InferenceError::MissingApiKey.to_string(),
            "API key not configured"
        );
        assert_eq!(
            InferenceError::Blocked("SAFETY".to_string()).to_string(),
            "Response blocked: SAFETY"
        );
    }
}
