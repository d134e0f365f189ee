//! Error types for the autofill matching core.

use thiserror::Error;

/// Errors that can occur while preparing a match.
///
/// The boolean matching API never returns these; they surface only from the
/// explicit `Result` entry points (pattern compilation, strategy parsing, JSON).
///
/// This enum is exposed to Swift/Kotlin via UniFFI as a flat error type,
/// meaning the error variants are exposed as simple enum cases with string messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
#[cfg_attr(feature = "uniffi", uniffi(flat_error))]
pub enum MatcherError {
    /// Error serializing/deserializing JSON
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A saved identifier could not be compiled as a regular expression
    #[error("Invalid regex pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A stored strategy name did not name any known strategy
    #[error("Unknown match strategy: {0}")]
    UnknownStrategy(String),
}

impl From<serde_json::Error> for MatcherError {
    fn from(err: serde_json::Error) -> Self {
        MatcherError::JsonError(err.to_string())
    }
}

/// Result type alias for matcher operations.
pub type MatcherResult<T> = Result<T, MatcherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        match MatcherError::from(err) {
            MatcherError::JsonError(message) => assert!(!message.is_empty()),
            other => panic!("expected JsonError, got {other:?}"),
        }
    }
}
