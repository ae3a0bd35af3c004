//! Error types for attribute analysis.

/// Errors that can occur while loading configuration, validating an upload,
/// or talking to the remote inference service.
#[derive(Debug, thiserror::Error)]
pub enum AttriscanError {
    /// Credential missing, unreadable, or malformed at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// API key rejected by the inference service.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Inference service returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded at the inference service.
    #[error("rate limited by the inference service")]
    RateLimited,

    /// Request was blocked by the service's safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Response arrived but did not carry usable text.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upload bytes are not one of the accepted image formats.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Upload bytes could not be decoded as an image.
    #[error("invalid image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// I/O error (e.g., reading the secrets file or an upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AttriscanError {
    /// Returns true for startup configuration failures. These are fatal:
    /// nothing may be rendered and no remote call may be attempted.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if the upload payload itself was rejected. The surface
    /// keeps its previous state when this happens.
    pub fn is_invalid_image(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_) | Self::ImageDecode(_))
    }

    /// Returns true for failures of the remote inference call. These are
    /// shown to the user in place of the result text.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Auth(_)
                | Self::Api { .. }
                | Self::RateLimited
                | Self::ContentBlocked(_)
                | Self::UnexpectedResponse(_)
                | Self::Network(_)
                | Self::Json(_)
        )
    }
}

/// Truncates and flattens an error body returned by the service so it can be
/// shown to the user without dumping pages of JSON.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > 600 {
        let truncated: String = flat.chars().take(600).collect();
        format!("{truncated}...")
    } else {
        flat
    }
}

/// Result type alias for attribute analysis operations.
pub type Result<T> = std::result::Result<T, AttriscanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_buckets() {
        assert!(AttriscanError::Config("no key".into()).is_configuration());
        assert!(!AttriscanError::Config("no key".into()).is_remote());

        assert!(AttriscanError::Auth("bad key".into()).is_remote());
        assert!(AttriscanError::RateLimited.is_remote());
        assert!(
            AttriscanError::Api {
                status: 500,
                message: "boom".into()
            }
            .is_remote()
        );

        assert!(AttriscanError::UnsupportedFormat("gif".into()).is_invalid_image());
        assert!(!AttriscanError::UnsupportedFormat("gif".into()).is_remote());
    }

    #[test]
    fn test_error_display() {
        let err = AttriscanError::Api {
            status: 503,
            message: "overloaded".into(),
        };
        assert_eq!(err.to_string(), "API error: 503 - overloaded");

        let err = AttriscanError::Config("google_api_key not set".into());
        assert_eq!(
            err.to_string(),
            "configuration error: google_api_key not set"
        );

        let err = AttriscanError::ContentBlocked("safety filter".into());
        assert_eq!(err.to_string(), "content blocked: safety filter");
    }

    #[test]
    fn test_sanitize_error_message() {
        assert_eq!(sanitize_error_message("  a\n  b\tc "), "a b c");

        let long = "x".repeat(700);
        let sanitized = sanitize_error_message(&long);
        assert_eq!(sanitized.len(), 603);
        assert!(sanitized.ends_with("..."));
    }
}
