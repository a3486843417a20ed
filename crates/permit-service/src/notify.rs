//! Chat push notifications.
//!
//! Two messages exist: the new-permit notice sent to the administrator and
//! the decision notice sent to the permit owner. Both are plain text in the
//! facility's language.

use chrono::NaiveDate;
use permit_core::error::{PermitError, PermitResult};
use permit_core::models::permit::{PermitStatus, WorkPermit};
use permit_core::models::wire::display_date;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::NotifyConfig;

/// Delivers a text message to one chat recipient.
pub trait Notifier: Send + Sync + 'static {
    fn push(&self, to: &str, text: String) -> impl Future<Output = PermitResult<()>> + Send;
}

/// Push client for the LINE messaging API.
#[derive(Clone)]
pub struct LinePushNotifier {
    http: Client,
    push_url: String,
    token: String,
}

impl LinePushNotifier {
    pub fn new(config: &NotifyConfig) -> PermitResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PermitError::Notification(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            push_url: config.push_url.clone(),
            token: config.channel_access_token.clone(),
        })
    }
}

impl Notifier for LinePushNotifier {
    async fn push(&self, to: &str, text: String) -> PermitResult<()> {
        let body = json!({
            "to": to,
            "messages": [{ "type": "text", "text": text }],
        });
        let response = self
            .http
            .post(&self.push_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PermitError::Notification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PermitError::Notification(format!(
                "push rejected with HTTP {}: {detail}",
                status.as_u16()
            )));
        }
        debug!(%to, "Push message delivered");
        Ok(())
    }
}

/// Content of the administrator's new-permit notice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermitNotice {
    pub permit_number: Option<String>,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub company_name: String,
    pub area: Option<String>,
    pub work_type: Option<String>,
    #[serde(default)]
    pub work_shift: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<&WorkPermit> for NewPermitNotice {
    fn from(p: &WorkPermit) -> Self {
        Self {
            permit_number: Some(p.permit_number.clone()),
            owner_name: p.owner_name.clone(),
            company_name: p.company_name.clone(),
            area: p.area_name.clone(),
            work_type: p.work_type_name.clone(),
            work_shift: p.work_shift.clone(),
            start_date: Some(p.start_date),
            end_date: Some(p.end_date),
        }
    }
}

impl NewPermitNotice {
    pub fn message(&self, liff_url: &str) -> String {
        format!(
            "🔔 มีคำขอเข้าปฏิบัติงานใหม่\n\
             \n\
             📋 เลขที่: {number}\n\
             👤 เจ้าของงาน: {owner}\n\
             🏢 บริษัท: {company}\n\
             📍 พื้นที่: {area}\n\
             🔧 ประเภทงาน: {work_type}\n\
             ⏰ ช่วงเวลา: {shift}\n\
             📅 ระยะเวลา: {start} ถึง {end}\n\
             📌 สถานะ: {status}\n\
             \n\
             กรุณาอนุมัติ Work Permit\n\
             {liff_url}",
            number = or_na(&self.permit_number),
            owner = self.owner_name,
            company = self.company_name,
            area = or_dash(&self.area),
            work_type = or_dash(&self.work_type),
            shift = self.work_shift,
            start = date_or_dash(self.start_date),
            end = date_or_dash(self.end_date),
            status = PermitStatus::Pending.label(),
        )
    }
}

/// Content of the owner's decision notice.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionNotice {
    #[serde(default)]
    pub line_user_id: String,
    pub permit_number: Option<String>,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub company_name: String,
    pub area: Option<String>,
    pub work_type: Option<String>,
    pub status: PermitStatus,
    pub approved_by: Option<String>,
}

impl DecisionNotice {
    pub fn for_permit(
        permit: &WorkPermit,
        line_user_id: String,
        status: PermitStatus,
        approved_by: &str,
    ) -> Self {
        Self {
            line_user_id,
            permit_number: Some(permit.permit_number.clone()),
            owner_name: permit.owner_name.clone(),
            company_name: permit.company_name.clone(),
            area: permit.area_name.clone(),
            work_type: permit.work_type_name.clone(),
            status,
            approved_by: Some(approved_by.to_string()),
        }
    }

    pub fn message(&self) -> String {
        let approved = self.status == PermitStatus::Approved;
        let (emoji, status, closing) = if approved {
            (
                "🎉",
                "✅ อนุมัติ",
                "✅ คุณสามารถเข้าปฏิบัติงานได้แล้ว กรุณาปฏิบัติตามกฎระเบียบความปลอดภัยอย่างเคร่งครัด",
            )
        } else {
            (
                "⚠️",
                "❌ ไม่อนุมัติ",
                "❌ คำขอของคุณไม่ได้รับการอนุมัติ กรุณาติดต่อเจ้าหน้าที่เพื่อสอบถามรายละเอียดเพิ่มเติม",
            )
        };
        format!(
            "{emoji} แจ้งผลการพิจารณาคำขอเข้าปฏิบัติงาน\n\
             \n\
             📋 เลขที่: {number}\n\
             👤 เจ้าของงาน: {owner}\n\
             🏢 บริษัท: {company}\n\
             📍 พื้นที่: {area}\n\
             🔧 ประเภทงาน: {work_type}\n\
             \n\
             📌 สถานะ: {status}\n\
             ✍️ ผู้อนุมัติ: {approver}\n\
             \n\
             {closing}",
            number = or_na(&self.permit_number),
            owner = self.owner_name,
            company = self.company_name,
            area = or_dash(&self.area),
            work_type = or_dash(&self.work_type),
            approver = or_dash(&self.approved_by),
        )
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("N/A")
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("-")
}

fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(display_date).unwrap_or_else(|| "-".into())
}
