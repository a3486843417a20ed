//! Flow-level error types.

use permit_core::error::PermitError;
use permit_core::models::permit::PermitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("phone number must have at least 10 characters")]
    PhoneTooShort,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("only administrators may do this")]
    NotAdmin,

    #[error("permit is already {0} and cannot be changed")]
    PermitClosed(PermitStatus),

    #[error("a permit can only be decided as approved or rejected, not {0}")]
    InvalidDecision(PermitStatus),

    #[error("only approved permits can be audited (current status: {0})")]
    NotApproved(PermitStatus),

    #[error("no files were uploaded")]
    NoFiles,

    #[error("{name}: file type {content_type} is not accepted")]
    UnsupportedFileType { name: String, content_type: String },

    #[error("{name}: {size} bytes exceeds the {max} byte limit")]
    FileTooLarge { name: String, size: usize, max: usize },
}

impl From<ServiceError> for PermitError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotAdmin => PermitError::Forbidden {
                reason: err.to_string(),
            },
            other => PermitError::Validation {
                message: other.to_string(),
            },
        }
    }
}
