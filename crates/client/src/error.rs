//! Remote API client error types.

use std::sync::Arc;

/// Errors from the remote bookmark API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// No usable credentials: the stored token is absent, unreadable or
    /// expired, or the remote rejected it. Credential acquisition happens
    /// outside this crate; callers only surface the condition.
    #[error("authentication required: {0}")]
    AuthRequired(String),

    /// Rate limited by the remote service.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// Non-success HTTP response.
    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ApiError::Timeout } else { ApiError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::AuthRequired("token expired".into());
        assert!(err.to_string().contains("authentication required"));
        assert!(err.to_string().contains("token expired"));

        let err = ApiError::HttpStatus { status: 500 };
        assert!(err.to_string().contains("500"));
    }
}
