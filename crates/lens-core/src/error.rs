//! Error types for lens-core

use thiserror::Error;

/// Result type alias for lens-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for assistant-facing operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Action parameters did not match the declared schema
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Action handler failed while executing
    #[error("Action failed: {0}")]
    ActionFailed(String),

    /// No action registered under the requested name
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// No context provider registered under the requested name
    #[error("Unknown context: {0}")]
    UnknownContext(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownAction("searchTicker".to_string());
        assert_eq!(err.to_string(), "Unknown action: searchTicker");

        let err = Error::InvalidParams("missing field `ticker`".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: missing field `ticker`");
    }
}
