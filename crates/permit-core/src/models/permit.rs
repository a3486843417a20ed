//! Work permit domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::wire;
use crate::error::PermitError;

/// Shift labels offered at submission time.
pub const WORK_SHIFTS: [&str; 3] = ["08:00-17:00", "17:00-00:00", "17:00-08:00"];

/// Permit lifecycle status.
///
/// Stored remotely under the facility's own labels; the English names are
/// accepted as aliases on input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PermitStatus {
    #[serde(rename = "รอตรวจสอบ", alias = "Pending")]
    Pending,
    #[serde(rename = "อนุมัติ", alias = "Approved")]
    Approved,
    #[serde(rename = "ไม่อนุมัติ", alias = "Rejected")]
    Rejected,
    #[serde(rename = "ยกเลิก", alias = "Cancelled")]
    Cancelled,
}

impl PermitStatus {
    pub const ALL: [PermitStatus; 4] = [
        PermitStatus::Pending,
        PermitStatus::Approved,
        PermitStatus::Rejected,
        PermitStatus::Cancelled,
    ];

    /// The label persisted by the data service.
    pub fn label(self) -> &'static str {
        match self {
            PermitStatus::Pending => "รอตรวจสอบ",
            PermitStatus::Approved => "อนุมัติ",
            PermitStatus::Rejected => "ไม่อนุมัติ",
            PermitStatus::Cancelled => "ยกเลิก",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PermitStatus::Pending => "Pending",
            PermitStatus::Approved => "Approved",
            PermitStatus::Rejected => "Rejected",
            PermitStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, PermitStatus::Pending)
    }
}

impl fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PermitStatus {
    type Err = PermitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PermitStatus::ALL
            .into_iter()
            .find(|status| status.label() == s || status.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PermitError::validation(format!("unknown permit status: {s}")))
    }
}

/// A permit row as surfaced by the `vw_WorkPermits` view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WorkPermit {
    pub permit_id: i64,
    pub permit_number: String,
    pub user_id: i64,
    #[serde(default)]
    pub line_user_id: Option<String>,
    pub owner_name: String,
    pub company_name: String,
    pub area_id: i64,
    #[serde(default)]
    pub area_name: Option<String>,
    pub work_type_id: i64,
    #[serde(default)]
    pub work_type_name: Option<String>,
    pub work_shift: String,
    #[serde(with = "wire::date")]
    pub start_date: NaiveDate,
    #[serde(with = "wire::date")]
    pub end_date: NaiveDate,
    pub status: PermitStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default, with = "wire::option_timestamp")]
    pub created_date: Option<NaiveDateTime>,
    #[serde(default, with = "wire::option_timestamp")]
    pub updated_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub document_count: Option<i64>,
}

impl WorkPermit {
    /// True when `date` falls inside the work period, both ends inclusive.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Input for submitting a new permit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkPermit {
    pub user_id: i64,
    pub owner_name: String,
    pub company_name: String,
    pub area_id: i64,
    pub work_type_id: i64,
    pub work_shift: String,
    #[serde(with = "wire::date")]
    pub start_date: NaiveDate,
    #[serde(with = "wire::date")]
    pub end_date: NaiveDate,
    pub remarks: Option<String>,
}

impl CreateWorkPermit {
    /// Submission-time checks. The data service does not re-validate the
    /// date range.
    pub fn validate(&self) -> Result<(), PermitError> {
        if self.owner_name.trim().is_empty() {
            return Err(PermitError::validation("owner name is required"));
        }
        if self.company_name.trim().is_empty() {
            return Err(PermitError::validation("company name is required"));
        }
        if !WORK_SHIFTS.contains(&self.work_shift.as_str()) {
            return Err(PermitError::validation(format!(
                "unknown work shift: {}",
                self.work_shift
            )));
        }
        if self.start_date > self.end_date {
            return Err(PermitError::validation(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}

/// Identifiers handed back by the create procedure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedPermit {
    pub permit_id: i64,
    pub permit_number: String,
}
