//! Static lookup data: facility areas and work types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Area {
    pub area_id: i64,
    pub area_code: String,
    pub area_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WorkType {
    pub work_type_id: i64,
    pub work_type_code: String,
    pub work_type_name: String,
    #[serde(default)]
    pub description: Option<String>,
}
