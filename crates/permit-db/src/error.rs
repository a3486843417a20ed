//! Data-service error types and conversions.

use std::time::Duration;

use permit_core::error::PermitError;

/// Failures of a single logical call to the remote data service.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The payload was rejected before anything was sent.
    #[error("{0}")]
    InvalidPayload(String),

    /// Still throttled after the retry ceiling was reached.
    #[error("{message}")]
    Throttled { retries: u32, message: String },

    /// Any other non-2xx answer.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: String,
    },

    /// No response was received.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Call did not complete within {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::Network(err.to_string())
    }
}

impl From<DataError> for PermitError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::InvalidPayload(message) => PermitError::Validation { message },
            DataError::Throttled { retries, message } => {
                PermitError::UpstreamThrottled { retries, message }
            }
            DataError::Upstream {
                status,
                message,
                details,
            } => PermitError::Upstream {
                status,
                message,
                details,
            },
            DataError::Network(msg) => PermitError::Network(msg),
            other => PermitError::Internal(other.to_string()),
        }
    }
}
