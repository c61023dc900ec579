use thiserror::Error;

/// Failures raised by data-store adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0}")]
    ExternalServiceError(String),

    #[error("Invalid response from data store: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
