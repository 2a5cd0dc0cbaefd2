//! Error types for the seteuk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; the top-level [`Error`] is
//! what generation-path operations surface to callers.

use thiserror::Error;

/// The top-level error type for seteuk operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Generation path ---
    /// A required setting (usually the credential) is missing.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The generator answered but produced no text.
    #[error("The generator returned no result")]
    EmptyResult,

    /// The upstream service rejected the credential.
    #[error("Credential rejected by the generation service: {0}")]
    Authentication(String),

    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// The generator returned text that does not match the requested schema.
    #[error("Malformed generator response: {0}")]
    MalformedResponse(String),

    // --- Resources ---
    // Document fetch failures never reach callers: the knowledge resolver
    // skips unavailable documents.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Shorthand for a [`Error::Config`] with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<ProviderError> for Error {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::AuthenticationFailed(reason) => Self::Authentication(reason),
            other => Self::Provider(other),
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Stored value could not be (de)serialized: {0}")]
    Serialization(String),
}

#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document fetch for {name} failed with status {status}")]
    Http { name: String, status: u16 },

    #[error("Document read failed: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 500,
            message: "Internal".into(),
        });
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("Internal"));
    }

    #[test]
    fn auth_failure_converts_to_distinct_variant() {
        let err: Error = ProviderError::AuthenticationFailed("API key not valid".into()).into();
        assert!(matches!(err, Error::Authentication(ref m) if m.contains("API key")));
    }

    #[test]
    fn other_provider_failures_stay_provider_errors() {
        let err: Error = ProviderError::Network("connection reset".into()).into();
        assert!(matches!(err, Error::Provider(ProviderError::Network(_))));
    }

    #[test]
    fn storage_errors_convert() {
        let err: Error = StorageError::Serialization("bad json".into()).into();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn config_shorthand() {
        let err = Error::config("missing credential");
        assert_eq!(err.to_string(), "Configuration error: missing credential");
    }
}
