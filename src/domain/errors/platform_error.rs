//! Errors from the host chat platform.

use thiserror::Error;

/// Platform (Discord REST) error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PlatformError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("rate limited by Discord, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Discord API rejected the request: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("malformed API response: {message}")]
    InvalidResponse { message: String },

    #[error("unexpected platform error: {message}")]
    Unexpected { message: String },
}

impl PlatformError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a not-found error for a named resource.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates an API rejection error.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether a retry could plausibly succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors_are_recoverable() {
        assert!(PlatformError::network("timeout").is_recoverable());
        assert!(PlatformError::RateLimited { retry_after_ms: 5000 }.is_recoverable());
    }

    #[test]
    fn test_rejections_are_not_recoverable() {
        assert!(!PlatformError::not_found("channel 1").is_recoverable());
        assert!(!PlatformError::api(413, "too large").is_recoverable());
        assert!(!PlatformError::invalid_response("bad json").is_recoverable());
    }
}
