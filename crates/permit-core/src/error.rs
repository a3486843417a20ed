//! Error types for the work permit system.

use serde::Serialize;
use thiserror::Error;

/// One item that failed inside an otherwise completed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub item: String,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum PermitError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// The data service kept answering "too many requests".
    #[error("{message}")]
    UpstreamThrottled { retries: u32, message: String },

    /// Any other non-2xx answer from the data service.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PermitError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

pub type PermitResult<T> = Result<T, PermitError>;
