//! Server configuration, read from the environment.

use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use permit_db::DataServiceConfig;
use permit_service::{NotifyConfig, ServiceConfig};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data: DataServiceConfig,
    pub service: ServiceConfig,
    /// Directory that uploaded attachments are written to.
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under.
    pub public_upload_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            data: DataServiceConfig::default(),
            service: ServiceConfig::default(),
            upload_dir: PathBuf::from("./data/uploads"),
            public_upload_url: "/uploads".into(),
        }
    }
}

impl ServerConfig {
    /// Read every setting from the environment, logging what falls back
    /// to its default. Secrets are never logged.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let data = DataServiceConfig {
            base_url: try_load("API_BASE_URL", defaults.data.base_url),
            api_key: secret("API_KEY"),
            database: try_load("DATABASE_NAME", defaults.data.database),
            ..defaults.data
        };
        let service = ServiceConfig {
            notify: NotifyConfig {
                channel_access_token: secret("LINE_CHANNEL_ACCESS_TOKEN"),
                admin_line_id: try_load("ADMIN_LINE_ID", defaults.service.notify.admin_line_id),
                liff_url: try_load("LIFF_URL", defaults.service.notify.liff_url),
                ..defaults.service.notify
            },
            ..defaults.service
        };

        Self {
            bind_addr: try_load("BIND_ADDR", defaults.bind_addr),
            data,
            service,
            upload_dir: try_load("UPLOAD_DIR", defaults.upload_dir.display().to_string()).into(),
            public_upload_url: try_load("PUBLIC_UPLOAD_URL", defaults.public_upload_url),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value ({e}), using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn secret(key: &str) -> String {
    var(key).unwrap_or_else(|| {
        warn!("{key} not set, outbound calls will be unauthenticated");
        String::new()
    })
}
