//! HTTP error responses.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use permit_core::error::PermitError;
use permit_db::DataError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected before any work was done.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Permit(#[from] PermitError),
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        ApiError::Permit(err.into())
    }
}

macro_rules! bad_request_from {
    ($($rejection:ty),+ $(,)?) => {
        $(impl From<$rejection> for ApiError {
            fn from(rejection: $rejection) -> Self {
                ApiError::BadRequest(rejection.body_text())
            }
        })+
    };
}

bad_request_from!(JsonRejection, QueryRejection, PathRejection, MultipartRejection);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Permit(err) => match err {
                PermitError::NotFound { .. } => StatusCode::NOT_FOUND,
                PermitError::Validation { .. } => StatusCode::BAD_REQUEST,
                PermitError::Forbidden { .. } => StatusCode::FORBIDDEN,
                PermitError::UpstreamThrottled { .. } => StatusCode::TOO_MANY_REQUESTS,
                PermitError::Upstream { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                PermitError::Network(_) | PermitError::Notification(_) => StatusCode::BAD_GATEWAY,
                PermitError::Storage(_) | PermitError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            ApiError::Permit(PermitError::Upstream { details, .. }) if !details.is_empty() => {
                Some(details)
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = json!({
            "error": self.to_string(),
            "details": self.details(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}
