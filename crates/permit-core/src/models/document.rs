//! Permit document (file attachment) model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::wire;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PermitDocument {
    #[serde(default)]
    pub document_id: Option<i64>,
    pub permit_id: i64,
    pub document_name: String,
    /// Public URL or object path of the stored file.
    pub document_path: String,
    pub document_type: String,
    pub file_size: i64,
    #[serde(default, with = "wire::option_timestamp")]
    pub uploaded_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermitDocument {
    pub permit_id: i64,
    pub document_name: String,
    pub document_path: String,
    pub document_type: String,
    pub file_size: i64,
}
