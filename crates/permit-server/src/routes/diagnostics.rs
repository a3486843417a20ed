//! Configuration summary for troubleshooting deployments.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::json;

use crate::state::SharedState;

pub async fn diagnostics(State(state): State<SharedState>) -> impl IntoResponse {
    let data = &state.config.data;
    let notify = &state.config.service.notify;
    let body = json!({
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "config": {
            "apiBaseUrl": data.base_url,
            "database": data.database,
            "apiKeyConfigured": !data.api_key.is_empty(),
            "apiKeyLength": data.api_key.len(),
            "minIntervalMs": data.min_interval.as_millis() as u64,
            "cacheTtlSecs": data.cache_ttl.as_secs(),
            "maxRetries": data.retry.max_retries,
            "lineTokenConfigured": !notify.channel_access_token.is_empty(),
            "adminLineIdConfigured": !notify.admin_line_id.is_empty(),
        },
        "facilityDate": state.permits.today().to_string(),
    });
    ([(header::CACHE_CONTROL, "no-store")], Json(body))
}
