// src/error.rs
//! Error vocabulary for hypermedia traversal.
//!
//! One crate-level enum covers every failure mode. Transport failures are
//! wrapped, never reinterpreted: whatever reqwest reports surfaces unchanged
//! at the point a deferred operation is forced. The only error this layer
//! raises on its own behalf is [`HalError::MissingUriTemplateVariables`].

use thiserror::Error;

/// Main error type for link resolution and traversal.
#[derive(Error, Debug)]
pub enum HalError {
    /// A templated link was resolved without ever having been given
    /// variables. Recoverable: call [`Link::expand`](crate::Link::expand)
    /// with a variable map and retry.
    #[error("The URL to this links is templated, but no variables where given.")]
    MissingUriTemplateVariables,

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The fetched body could not be parsed as a hypermedia document.
    #[error("Malformed resource: {0}")]
    MalformedResource(String),

    /// A deferred operation's task was cancelled or panicked before
    /// producing a result.
    #[error("Deferred operation failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for HalError {
    fn from(err: serde_json::Error) -> Self {
        HalError::MalformedResource(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = HalError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_message_is_fixed() {
        let err = HalError::MissingUriTemplateVariables;
        assert_eq!(
            err.to_string(),
            "The URL to this links is templated, but no variables where given."
        );
    }

    #[test]
    fn malformed_resource_carries_cause() {
        let err = HalError::MalformedResource("expected an object".to_string());
        assert_eq!(err.to_string(), "Malformed resource: expected an object");
    }

    #[test]
    fn json_errors_map_to_malformed_resource() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = HalError::from(json_err);
        assert!(matches!(err, HalError::MalformedResource(_)));
    }
}
