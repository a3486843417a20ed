//! Flow configuration: paging, facility clock, uploads and chat pushes.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Configuration for the permit flows.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Permits per page in the admin list (default: 10).
    pub page_size: u64,
    /// Facility offset from UTC in seconds (default: +07:00).
    pub utc_offset_secs: i32,
    pub upload: UploadPolicy,
    pub notify: NotifyConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            utc_offset_secs: 7 * 3600,
            upload: UploadPolicy::default(),
            notify: NotifyConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn facility_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }

    /// Today's calendar date at the facility.
    pub fn today(&self) -> NaiveDate {
        date_at(Utc::now(), self.facility_offset())
    }
}

/// Calendar date of `now` as seen from `offset`.
pub fn date_at(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// What attachments are accepted.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Accepted MIME types.
    pub allowed_types: Vec<String>,
    /// Per-file size cap in bytes (default: 250 KiB).
    pub max_file_size: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_types: ["image/jpeg", "image/jpg", "image/png"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_file_size: 250 * 1024,
        }
    }
}

/// Chat push settings.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Push endpoint of the messaging platform.
    pub push_url: String,
    /// Channel access token, sent as a bearer token.
    pub channel_access_token: String,
    /// Recipient of new-permit notices. Empty disables them.
    pub admin_line_id: String,
    /// Deep link appended to admin notices.
    pub liff_url: String,
    pub request_timeout: Duration,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            push_url: "https://api.line.me/v2/bot/message/push".into(),
            channel_access_token: String::new(),
            admin_line_id: String::new(),
            liff_url: "https://liff.line.me/1654076318-08gnXfNt".into(),
            request_timeout: Duration::from_secs(10),
        }
    }
}
