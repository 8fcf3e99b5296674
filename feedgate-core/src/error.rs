//! Error types for Feedgate.
//!
//! Every route failure falls into one of three kinds: a missing
//! configuration value, a rejected request parameter, or an upstream
//! failure. The first two are raised before any network call is made.

use thiserror::Error;

/// Result type alias using `FeedError`.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Main error type for all Feedgate operations.
#[derive(Debug, Error)]
pub enum FeedError {
    // ═══════════════════════════════════════════════════════════════════════════
    // REQUEST ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A required credential or configuration value is absent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A path or query parameter is outside the accepted set.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Network or API-level failure from an external call.
    #[error("Upstream request failed ({context}): {reason}")]
    Upstream { context: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cache backend failure.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal invariant violation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FeedError {
    /// Shorthand for [`FeedError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        FeedError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`FeedError::Upstream`].
    pub fn upstream(context: impl Into<String>, reason: impl ToString) -> Self {
        FeedError::Upstream {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the caller sent something we reject.
    pub fn is_client_error(&self) -> bool {
        matches!(self, FeedError::InvalidParameter { .. })
    }

    /// Returns true if an external API call failed.
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, FeedError::Upstream { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::invalid_parameter("sub", "unknown site 'foo'");
        assert_eq!(err.to_string(), "Invalid parameter 'sub': unknown site 'foo'");

        let err = FeedError::upstream("novel 42", "HTTP 500");
        assert!(err.to_string().contains("novel 42"));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_error_classification() {
        assert!(FeedError::invalid_parameter("a", "b").is_client_error());
        assert!(!FeedError::Config("token".into()).is_client_error());

        assert!(FeedError::upstream("list", "timeout").is_upstream_error());
        assert!(!FeedError::Cache("down".into()).is_upstream_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let feed_result: Result<serde_json::Value> = json_result.map_err(FeedError::from);
        assert!(matches!(feed_result, Err(FeedError::Json(_))));
    }
}
