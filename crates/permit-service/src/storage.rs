//! Object storage for permit attachments.

use std::path::PathBuf;

use permit_core::error::{PermitError, PermitResult};
use tokio::fs;
use tracing::debug;

/// Stores a blob under a relative key and returns the public URL it will
/// be served from.
pub trait ObjectStore: Send + Sync {
    fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = PermitResult<String>> + Send;
}

/// Writes objects below a directory that is served at `public_base`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }
}

impl ObjectStore for LocalObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> PermitResult<String> {
        if key.split('/').any(|part| part.is_empty() || part == "..") {
            return Err(PermitError::Storage(format!("invalid object key: {key}")));
        }
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PermitError::Storage(e.to_string()))?;
        }
        let size = bytes.len();
        fs::write(&path, bytes)
            .await
            .map_err(|e| PermitError::Storage(e.to_string()))?;
        debug!(%key, size, content_type, "Object stored");
        Ok(format!("{}/{key}", self.public_base.trim_end_matches('/')))
    }
}

/// `<millis>_<name>` with anything outside `[A-Za-z0-9.-]` replaced by `_`.
pub fn safe_file_name(millis: i64, original: &str) -> String {
    let cleaned: String = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{millis}_{cleaned}")
}

/// Storage key of an attachment.
pub fn object_key(permit_id: i64, file_name: &str) -> String {
    format!("permits/{permit_id}/{file_name}")
}
