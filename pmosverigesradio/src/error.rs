//! Error types for the Sveriges Radio client

/// Result type alias for Sveriges Radio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Sveriges Radio client
///
/// Malformed timestamps and missing JSON fields are recovered locally and
/// never show up here. Everything else (transport failures, bad statuses,
/// bodies that are not JSON) is returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// API returned an error status
    #[error("API error: {0}")]
    ApiError(String),

    /// No channel matches the requested name
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// Configuration error (from pmoconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = Error::api_error("API returned status: 503 Service Unavailable");
        assert!(matches!(err, Error::ApiError(_)));
        assert_eq!(
            err.to_string(),
            "API error: API returned status: 503 Service Unavailable"
        );
    }
}
