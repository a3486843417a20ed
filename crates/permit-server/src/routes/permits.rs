//! Permit submission, review, documents and audits.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::NaiveDate;
use permit_core::error::PermitError;
use permit_core::models::audit::{AuditChecklist, CreatePermitAudit, PermitAudit};
use permit_core::models::document::PermitDocument;
use permit_core::models::permit::{
    CreateWorkPermit, CreatedPermit, PermitStatus, WORK_SHIFTS, WorkPermit,
};
use permit_core::models::reference::{Area, WorkType};
use permit_core::models::user::User;
use permit_core::repository::ReferenceRepository;
use permit_service::PermitOverview;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::SharedState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub areas: Vec<Area>,
    pub work_types: Vec<WorkType>,
    pub work_shifts: &'static [&'static str],
}

pub async fn reference(State(state): State<SharedState>) -> Result<Json<ReferenceData>, ApiError> {
    Ok(Json(ReferenceData {
        areas: state.reference.list_areas().await?,
        work_types: state.reference.list_work_types().await?,
        work_shifts: &WORK_SHIFTS,
    }))
}

pub async fn submit(
    State(state): State<SharedState>,
    AppJson(input): AppJson<CreateWorkPermit>,
) -> Result<(StatusCode, Json<CreatedPermit>), ApiError> {
    let created = state.permits.submit(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub date: Option<NaiveDate>,
    pub page: Option<u64>,
}

pub async fn admin_list(
    State(state): State<SharedState>,
    AppQuery(query): AppQuery<AdminListQuery>,
) -> Result<Json<PermitOverview>, ApiError> {
    let overview = state
        .permits
        .list_all(query.date, query.page.unwrap_or(1))
        .await?;
    Ok(Json(overview))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    /// `Approved` / `Rejected`, or the stored labels.
    pub status: String,
    pub reviewer_line_user_id: String,
}

/// The acting user, who must be registered.
async fn acting_user(state: &SharedState, line_user_id: &str) -> Result<User, ApiError> {
    state
        .registration
        .resolve(line_user_id)
        .await?
        .ok_or_else(|| {
            PermitError::Forbidden {
                reason: "unknown reviewer".into(),
            }
            .into()
        })
}

pub async fn decide(
    State(state): State<SharedState>,
    AppPath(permit_id): AppPath<i64>,
    AppJson(req): AppJson<DecisionRequest>,
) -> Result<Json<WorkPermit>, ApiError> {
    let decision: PermitStatus = req.status.parse()?;
    let reviewer = acting_user(&state, &req.reviewer_line_user_id).await?;
    let permit = state.permits.decide(permit_id, decision, &reviewer).await?;
    Ok(Json(permit))
}

pub async fn documents(
    State(state): State<SharedState>,
    AppPath(permit_id): AppPath<i64>,
) -> Result<Json<Vec<PermitDocument>>, ApiError> {
    Ok(Json(state.documents.list(permit_id).await?))
}

#[derive(Serialize)]
pub struct AuditView {
    pub latest: Option<PermitAudit>,
}

pub async fn latest_audit(
    State(state): State<SharedState>,
    AppPath(permit_id): AppPath<i64>,
) -> Result<Json<AuditView>, ApiError> {
    Ok(Json(AuditView {
        latest: state.audits.latest(permit_id).await?,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAuditRequest {
    pub auditor_line_user_id: String,
    pub remarks: Option<String>,
    #[serde(flatten)]
    pub checks: AuditChecklist,
}

pub async fn record_audit(
    State(state): State<SharedState>,
    AppPath(permit_id): AppPath<i64>,
    AppJson(req): AppJson<RecordAuditRequest>,
) -> Result<StatusCode, ApiError> {
    let auditor = acting_user(&state, &req.auditor_line_user_id).await?;
    state
        .audits
        .record(
            &auditor,
            CreatePermitAudit {
                permit_id,
                audited_by: auditor.user_id,
                checks: req.checks,
                remarks: req.remarks,
            },
        )
        .await?;
    Ok(StatusCode::CREATED)
}
