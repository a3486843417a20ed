//! Remote implementation of [`WorkPermitRepository`].

use std::sync::LazyLock;

use permit_core::error::{PermitError, PermitResult};
use permit_core::models::permit::{CreateWorkPermit, CreatedPermit, PermitStatus, WorkPermit};
use permit_core::models::wire::DATE_FORMAT;
use permit_core::repository::WorkPermitRepository;
use serde_json::json;
use tracing::info;

use crate::client::DataClient;
use crate::payload::{Params, insert_text, params};
use crate::transport::Transport;

/// Pending first, then approved, then rejected, then everything else.
static LIST_ALL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT * FROM vw_WorkPermits ORDER BY CASE \
         WHEN Status = N'{}' THEN 1 \
         WHEN Status = N'{}' THEN 2 \
         WHEN Status = N'{}' THEN 3 \
         ELSE 4 END, CreatedDate DESC",
        PermitStatus::Pending.label(),
        PermitStatus::Approved.label(),
        PermitStatus::Rejected.label(),
    )
});

pub struct RemoteWorkPermitRepository<T> {
    client: DataClient<T>,
}

impl<T: Transport> RemoteWorkPermitRepository<T> {
    pub fn new(client: DataClient<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> WorkPermitRepository for RemoteWorkPermitRepository<T> {
    async fn create(&self, input: CreateWorkPermit) -> PermitResult<CreatedPermit> {
        let mut parameters = params(json!({
            "UserId": input.user_id,
            "OwnerName": input.owner_name,
            "CompanyName": input.company_name,
            "AreaId": input.area_id,
            "WorkTypeId": input.work_type_id,
            "WorkShift": input.work_shift,
            "StartDate": input.start_date.format(DATE_FORMAT).to_string(),
            "EndDate": input.end_date.format(DATE_FORMAT).to_string(),
        }));
        insert_text(&mut parameters, "Remarks", input.remarks.as_deref());

        let created: Vec<CreatedPermit> = self
            .client
            .invoke_rows("usp_CreateWorkPermit", parameters)
            .await?;
        let created = created.into_iter().next().ok_or_else(|| {
            PermitError::Internal("permit creation returned no identifiers".into())
        })?;

        info!(
            permit_id = created.permit_id,
            permit_number = %created.permit_number,
            "Work permit created"
        );
        Ok(created)
    }

    async fn get_by_id(&self, permit_id: i64) -> PermitResult<WorkPermit> {
        // Uncached: decisions must see the current status.
        let permits: Vec<WorkPermit> = self
            .client
            .query_rows_uncached(
                "SELECT * FROM vw_WorkPermits WHERE PermitId = @PermitId",
                params(json!({ "PermitId": permit_id })),
            )
            .await?;
        permits
            .into_iter()
            .next()
            .ok_or_else(|| PermitError::not_found("WorkPermit", permit_id))
    }

    async fn list_by_user(&self, user_id: i64) -> PermitResult<Vec<WorkPermit>> {
        Ok(self
            .client
            .query_rows(
                "SELECT * FROM vw_WorkPermits WHERE UserId = @UserId ORDER BY CreatedDate DESC",
                params(json!({ "UserId": user_id })),
            )
            .await?)
    }

    async fn list_all(&self) -> PermitResult<Vec<WorkPermit>> {
        Ok(self.client.query_rows(&LIST_ALL, Params::new()).await?)
    }

    async fn update_status(
        &self,
        permit_id: i64,
        status: PermitStatus,
        reviewed_by: i64,
    ) -> PermitResult<()> {
        self.client
            .invoke(
                "usp_UpdateWorkPermitStatus",
                params(json!({
                    "PermitId": permit_id,
                    "Status": status.label(),
                    "ReviewedBy": reviewed_by,
                })),
            )
            .await?;
        info!(permit_id, status = %status, reviewed_by, "Permit status updated");
        Ok(())
    }
}
