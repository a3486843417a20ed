//! Registration and profile endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::NaiveDate;
use permit_core::models::permit::WorkPermit;
use permit_core::models::user::{RegisterUser, User};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::SharedState;

#[derive(Serialize)]
pub struct LookupResponse {
    pub registered: bool,
    pub user: Option<User>,
}

pub async fn by_line_id(
    State(state): State<SharedState>,
    AppPath(line_user_id): AppPath<String>,
) -> Result<Json<LookupResponse>, ApiError> {
    let user = state.registration.resolve(&line_user_id).await?;
    Ok(Json(LookupResponse {
        registered: user.is_some(),
        user,
    }))
}

pub async fn register(
    State(state): State<SharedState>,
    AppJson(input): AppJson<RegisterUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.registration.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub user_id: Option<i64>,
    pub full_name: Option<String>,
}

pub async fn update_name(
    State(state): State<SharedState>,
    AppJson(req): AppJson<RenameRequest>,
) -> Result<Json<Value>, ApiError> {
    let (Some(user_id), Some(full_name)) = (req.user_id, req.full_name) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: userId and fullName".into(),
        ));
    };
    let renamed = state.registration.rename(user_id, &full_name).await?;
    Ok(Json(json!({ "success": true, "data": renamed })))
}

#[derive(Debug, Default, Deserialize)]
pub struct DateFilter {
    pub date: Option<NaiveDate>,
}

pub async fn permits(
    State(state): State<SharedState>,
    AppPath(user_id): AppPath<i64>,
    AppQuery(filter): AppQuery<DateFilter>,
) -> Result<Json<Vec<WorkPermit>>, ApiError> {
    Ok(Json(state.permits.list_for_user(user_id, filter.date).await?))
}
