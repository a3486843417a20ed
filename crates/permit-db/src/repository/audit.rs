//! Remote implementation of [`AuditRepository`].

use permit_core::error::PermitResult;
use permit_core::models::audit::{CreatePermitAudit, PermitAudit};
use permit_core::repository::AuditRepository;
use serde_json::{Value, json};
use tracing::info;

use crate::client::DataClient;
use crate::payload::{insert_text, params};
use crate::transport::Transport;

pub struct RemoteAuditRepository<T> {
    client: DataClient<T>,
}

impl<T: Transport> RemoteAuditRepository<T> {
    pub fn new(client: DataClient<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> AuditRepository for RemoteAuditRepository<T> {
    async fn create(&self, input: CreatePermitAudit) -> PermitResult<()> {
        let mut parameters = params(json!({
            "PermitId": input.permit_id,
            "AuditedBy": input.audited_by,
        }));
        for (check, passed) in input.checks.items() {
            parameters.insert(check.name().to_string(), Value::Bool(passed));
        }
        insert_text(&mut parameters, "Remarks", input.remarks.as_deref());

        self.client
            .invoke("usp_CreateWorkPermitAudit", parameters)
            .await?;
        info!(
            permit_id = input.permit_id,
            audited_by = input.audited_by,
            passed = input.checks.passed(),
            "Permit audit recorded"
        );
        Ok(())
    }

    async fn list_by_permit(&self, permit_id: i64) -> PermitResult<Vec<PermitAudit>> {
        Ok(self
            .client
            .invoke_rows(
                "usp_GetWorkPermitAudits",
                params(json!({ "PermitId": permit_id })),
            )
            .await?)
    }
}
