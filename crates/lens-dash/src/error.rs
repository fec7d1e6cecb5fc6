//! Error types for dashboard operations

use thiserror::Error;

/// Dashboard specific errors
#[derive(Debug, Error)]
pub enum DashError {
    /// Backend responded with a non-success status
    #[error("{detail}")]
    Http { status: u16, detail: String },

    /// Network or transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No ticker given to search for
    #[error("Empty ticker")]
    EmptyTicker,

    /// A superseding run cancelled this automation sequence
    #[error("Automation cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl DashError {
    /// The user-facing message for this failure.
    ///
    /// HTTP failures surface the server-provided detail string verbatim;
    /// everything else falls back to the display form.
    pub fn detail_message(&self) -> String {
        match self {
            Self::Http { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashError>;

/// Convert DashError to lens_core::Error
impl From<DashError> for lens_core::Error {
    fn from(err: DashError) -> Self {
        lens_core::Error::ActionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_detail_surfaces_verbatim() {
        let err = DashError::Http {
            status: 404,
            detail: "No data found for ticker 'ZZZZ'".to_string(),
        };
        assert_eq!(err.detail_message(), "No data found for ticker 'ZZZZ'");
        assert_eq!(err.to_string(), "No data found for ticker 'ZZZZ'");
    }

    #[test]
    fn test_error_conversion() {
        let dash_err = DashError::Cancelled;
        let core_err: lens_core::Error = dash_err.into();

        match core_err {
            lens_core::Error::ActionFailed(msg) => {
                assert!(msg.contains("cancelled"));
            },
            _ => panic!("Expected ActionFailed variant"),
        }
    }
}
