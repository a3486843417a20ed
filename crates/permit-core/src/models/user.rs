//! User domain model.

use serde::{Deserialize, Serialize};

use super::wire;

/// A registered contractor or administrator, bound 1:1 to a chat-login
/// account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub user_id: i64,
    pub line_user_id: String,
    pub company_name: String,
    #[serde(default)]
    pub department: Option<String>,
    pub full_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "wire::flag::deserialize")]
    pub is_admin: bool,
    #[serde(default = "default_active", deserialize_with = "wire::flag::deserialize")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub line_user_id: String,
    pub company_name: String,
    pub department: Option<String>,
    pub full_name: String,
    pub phone_number: String,
    pub email: Option<String>,
}

/// Result row of a display-name correction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RenamedUser {
    pub user_id: i64,
    pub full_name: String,
    #[serde(default, with = "wire::option_timestamp")]
    pub updated_date: Option<chrono::NaiveDateTime>,
}
