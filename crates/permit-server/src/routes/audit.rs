//! Audit endpoint: records and returns checklists as submitted, without
//! checking the permit's status.

use axum::Json;
use axum::extract::State;
use permit_core::models::audit::{AuditChecklist, CreatePermitAudit};
use permit_core::repository::AuditRepository;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::extract::{AppJson, AppQuery};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    pub permit_id: Option<i64>,
    pub audited_by: Option<i64>,
    pub remarks: Option<String>,
    #[serde(flatten)]
    pub checks: AuditChecklist,
}

pub async fn create(
    State(state): State<SharedState>,
    AppJson(req): AppJson<AuditRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(permit_id), Some(audited_by)) = (req.permit_id, req.audited_by) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: permitId and auditedBy".into(),
        ));
    };

    state
        .audit_log
        .create(CreatePermitAudit {
            permit_id,
            audited_by,
            checks: req.checks,
            remarks: req.remarks,
        })
        .await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    pub permit_id: Option<i64>,
}

pub async fn list(
    State(state): State<SharedState>,
    AppQuery(query): AppQuery<AuditQuery>,
) -> Result<Json<Value>, ApiError> {
    let permit_id = query
        .permit_id
        .ok_or_else(|| ApiError::BadRequest("Missing permitId parameter".into()))?;
    let audits = state.audit_log.list_by_permit(permit_id).await?;
    Ok(Json(json!({ "success": true, "data": audits })))
}
