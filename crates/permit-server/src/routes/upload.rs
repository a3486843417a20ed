//! Multipart attachment upload.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use permit_service::UploadFile;
use serde_json::json;

use crate::error::ApiError;
use crate::state::SharedState;

/// Fields: `permitId` and one or more `files`. Answers 207 when files were
/// stored but some could not be attached to the permit.
pub async fn upload(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart?;
    let mut permit_id = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("permitId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                permit_id = text.trim().parse::<i64>().ok();
            }
            Some("files") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                files.push(UploadFile {
                    name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let permit_id = match permit_id {
        Some(id) if !files.is_empty() => id,
        _ => return Err(ApiError::BadRequest("ไม่พบ Permit ID หรือไฟล์".into())),
    };

    let report = state.documents.upload(permit_id, files).await?;
    if report.is_complete() {
        let message = format!("อัพโหลด {} ไฟล์สำเร็จ", report.files.len());
        return Ok(Json(json!({
            "success": true,
            "files": report.files,
            "message": message,
        }))
        .into_response());
    }

    Ok((
        StatusCode::MULTI_STATUS,
        Json(json!({
            "success": false,
            "error": "ไฟล์อัพโหลดสำเร็จแต่บันทึกลงฐานข้อมูลไม่สำเร็จ",
            "details": report.failures,
            "files": report.files,
        })),
    )
        .into_response())
}
