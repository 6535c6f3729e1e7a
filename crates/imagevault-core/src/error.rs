//! Error types module
//!
//! All configuration-time and orchestration-level failures are unified under
//! the `AppError` enum. Per-file rejections are deliberately *not* errors:
//! they are reported through the upload filter's `on_invalid` hook and the
//! upload simply does not proceed into storage. Likewise a URL requested for
//! a variant that has not finished persisting resolves to `None`, not to an
//! error.

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type used throughout the workspace
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Configuration failure with a formatted message
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    /// Missing construction-time dependency or parameter.
    ///
    /// Surfaced synchronously to the caller; no partially-built factory or
    /// collection is ever returned alongside this error.
    pub fn missing(name: impl Into<String>) -> Self {
        AppError::MissingParameter(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::config("empty collection name");
        assert_eq!(err.to_string(), "Configuration error: empty collection name");

        let err = AppError::missing("image collection factory");
        assert_eq!(
            err.to_string(),
            "Missing required parameter: image collection factory"
        );
    }
}
