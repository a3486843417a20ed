//! Permit attachments: validation, storage and metadata.

use chrono::Utc;
use permit_core::error::{ItemFailure, PermitResult};
use permit_core::models::document::{CreatePermitDocument, PermitDocument};
use permit_core::repository::DocumentRepository;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::UploadPolicy;
use crate::error::ServiceError;
use crate::storage::{ObjectStore, object_key, safe_file_name};

/// A file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub original_name: String,
    pub filename: String,
    /// Public URL of the stored object.
    pub path: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Outcome of an upload. Files are stored before their metadata is
/// attached; a metadata failure leaves the file in place and is listed
/// in `failures`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadReport {
    pub files: Vec<StoredFile>,
    pub failures: Vec<ItemFailure>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct DocumentService<D: DocumentRepository, O: ObjectStore> {
    document_repo: D,
    store: O,
    policy: UploadPolicy,
}

impl<D: DocumentRepository, O: ObjectStore> DocumentService<D, O> {
    pub fn new(document_repo: D, store: O, policy: UploadPolicy) -> Self {
        Self {
            document_repo,
            store,
            policy,
        }
    }

    /// Reject the whole batch if any file breaks the policy.
    pub fn validate(&self, files: &[UploadFile]) -> Result<(), ServiceError> {
        if files.is_empty() {
            return Err(ServiceError::NoFiles);
        }
        for file in files {
            if !self
                .policy
                .allowed_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&file.content_type))
            {
                return Err(ServiceError::UnsupportedFileType {
                    name: file.name.clone(),
                    content_type: file.content_type.clone(),
                });
            }
            if file.bytes.len() > self.policy.max_file_size {
                return Err(ServiceError::FileTooLarge {
                    name: file.name.clone(),
                    size: file.bytes.len(),
                    max: self.policy.max_file_size,
                });
            }
        }
        Ok(())
    }

    /// Store every file, then attach its metadata to the permit.
    ///
    /// A storage failure aborts the call; metadata failures are collected.
    pub async fn upload(&self, permit_id: i64, files: Vec<UploadFile>) -> PermitResult<UploadReport> {
        self.validate(&files)?;

        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            let filename = safe_file_name(Utc::now().timestamp_millis(), &file.name);
            let size = file.bytes.len();
            let path = self
                .store
                .put(&object_key(permit_id, &filename), file.bytes, &file.content_type)
                .await?;
            stored.push(StoredFile {
                original_name: file.name,
                filename,
                path,
                size,
                content_type: file.content_type,
            });
        }

        let mut failures = Vec::new();
        for file in &stored {
            let attached = self
                .document_repo
                .add(CreatePermitDocument {
                    permit_id,
                    document_name: file.original_name.clone(),
                    document_path: file.path.clone(),
                    document_type: file.content_type.clone(),
                    file_size: file.size as i64,
                })
                .await;
            if let Err(e) = attached {
                warn!(permit_id, file = %file.original_name, error = %e, "Attaching document failed");
                failures.push(ItemFailure {
                    item: file.original_name.clone(),
                    error: e.to_string(),
                });
            }
        }

        info!(
            permit_id,
            stored = stored.len(),
            failed = failures.len(),
            "Upload finished"
        );
        Ok(UploadReport {
            files: stored,
            failures,
        })
    }

    pub async fn list(&self, permit_id: i64) -> PermitResult<Vec<PermitDocument>> {
        self.document_repo.list_by_permit(permit_id).await
    }
}
