//! Remote implementation of [`DocumentRepository`].

use permit_core::error::PermitResult;
use permit_core::models::document::{CreatePermitDocument, PermitDocument};
use permit_core::repository::DocumentRepository;
use serde_json::json;

use crate::client::DataClient;
use crate::payload::params;
use crate::transport::Transport;

pub struct RemoteDocumentRepository<T> {
    client: DataClient<T>,
}

impl<T: Transport> RemoteDocumentRepository<T> {
    pub fn new(client: DataClient<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> DocumentRepository for RemoteDocumentRepository<T> {
    async fn list_by_permit(&self, permit_id: i64) -> PermitResult<Vec<PermitDocument>> {
        Ok(self
            .client
            .query_rows(
                "SELECT * FROM WorkPermitDocuments WHERE PermitId = @PermitId \
                 ORDER BY UploadedDate DESC",
                params(json!({ "PermitId": permit_id })),
            )
            .await?)
    }

    async fn add(&self, input: CreatePermitDocument) -> PermitResult<()> {
        self.client
            .invoke(
                "usp_AddPermitDocument",
                params(json!({
                    "PermitId": input.permit_id,
                    "DocumentName": input.document_name,
                    "DocumentPath": input.document_path,
                    "DocumentType": input.document_type,
                    "FileSize": input.file_size,
                })),
            )
            .await?;
        Ok(())
    }
}
