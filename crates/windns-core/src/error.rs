//! Error types for the WinDNS provider
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Marker the DNS server cmdlets put in their error text when a record is absent
pub const OBJECT_NOT_FOUND: &str = "ObjectNotFound";

/// Result type alias for WinDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the WinDNS provider
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing or empty
    #[error("{0}")]
    Validation(String),

    /// The record type is not one of A, CNAME or PTR
    #[error(
        "Unknown record type. This provider currently only supports 'A', 'CNAME', and 'PTR' records."
    )]
    UnsupportedType(String),

    /// The remote command failed; the message is passed through untouched
    #[error("{0}")]
    Execution(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// State store-related errors
    #[error("State store error: {0}")]
    StateStore(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unsupported record type error
    pub fn unsupported_type(record_type: impl Into<String>) -> Self {
        Self::UnsupportedType(record_type.into())
    }

    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a state store error
    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Whether the error text reports a missing DNS object.
    ///
    /// Only the text is inspected, so transport failures that happen to
    /// mention `ObjectNotFound` are treated the same as a missing record.
    pub fn is_object_not_found(&self) -> bool {
        self.to_string().contains(OBJECT_NOT_FOUND)
    }

    /// Whether this error was raised before any remote call was made
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnsupportedType(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_message_is_verbatim() {
        let err = Error::execution("Access is denied.");
        assert_eq!(err.to_string(), "Access is denied.");
    }

    #[test]
    fn test_object_not_found_detection() {
        let err = Error::execution(
            "Failed to get host03 record in contoso.com zone. + CategoryInfo : ObjectNotFound: (host03:root/Microsoft/...)",
        );
        assert!(err.is_object_not_found());
        assert!(!Error::execution("WinRM cannot complete the operation").is_object_not_found());
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::validation("missing").is_validation());
        assert!(Error::unsupported_type("MX").is_validation());
        assert!(!Error::execution("boom").is_validation());
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = Error::unsupported_type("MX");
        assert_eq!(
            err.to_string(),
            "Unknown record type. This provider currently only supports 'A', 'CNAME', and 'PTR' records."
        );
        assert!(matches!(err, Error::UnsupportedType(ref t) if t == "MX"));
    }
}
