//! Direct chat push endpoints.

use axum::Json;
use axum::extract::State;
use permit_core::error::PermitError;
use permit_service::{DecisionNotice, NewPermitNotice, Notifier};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::extract::AppJson;
use crate::state::SharedState;

/// New-permit notice to the administrator.
pub async fn notify_admin(
    State(state): State<SharedState>,
    AppJson(notice): AppJson<NewPermitNotice>,
) -> Result<Json<Value>, ApiError> {
    let notify = &state.config.service.notify;
    if notify.admin_line_id.is_empty() {
        return Err(PermitError::Notification("no administrator chat id configured".into()).into());
    }
    state
        .notifier
        .push(&notify.admin_line_id, notice.message(&notify.liff_url))
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Notification sent successfully",
    })))
}

/// Decision notice to a permit owner.
pub async fn notify_user(
    State(state): State<SharedState>,
    AppJson(notice): AppJson<DecisionNotice>,
) -> Result<Json<Value>, ApiError> {
    if notice.line_user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("LINE User ID is required".into()));
    }
    state
        .notifier
        .push(&notice.line_user_id, notice.message())
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "User notification sent successfully",
    })))
}
