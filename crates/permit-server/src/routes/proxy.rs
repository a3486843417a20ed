//! Request forwarder: relays a query or procedure payload to the data
//! service through the shared client.

use axum::Json;
use axum::extract::State;
use permit_db::{CacheMode, Payload};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::AppJson;
use crate::state::SharedState;

pub async fn forward(
    State(state): State<SharedState>,
    AppJson(payload): AppJson<Payload>,
) -> Result<Json<Value>, ApiError> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        database = payload.database.as_deref().unwrap_or(""),
        operation = payload.label(),
        "Forwarding data service request"
    );

    let body = state.client.send(&payload, CacheMode::Use).await?;
    if body.is_null() {
        return Ok(Json(json!({ "data": [] })));
    }
    Ok(Json(body))
}
