//! Provider error types.

use thiserror::Error;

/// Errors that can occur when talking to a chat provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Whether retrying the same request can ever succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }

    /// Suggested retry delay, when the provider supplied one.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanence_and_retry_hints() {
        let rate_limited = ProviderError::RateLimited {
            retry_after_ms: 2000,
        };
        assert!(!rate_limited.is_permanent());
        assert_eq!(rate_limited.retry_after_ms(), Some(2000));

        let auth = ProviderError::AuthenticationFailed("bad key".into());
        assert!(auth.is_permanent());
        assert_eq!(auth.retry_after_ms(), None);

        assert!(!ProviderError::Timeout(120).is_permanent());
    }
}
