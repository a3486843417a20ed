//! Site audits of approved permits.

use permit_core::error::PermitResult;
use permit_core::models::audit::{CreatePermitAudit, PermitAudit, latest_audit};
use permit_core::models::permit::PermitStatus;
use permit_core::models::user::User;
use permit_core::repository::{AuditRepository, WorkPermitRepository};

use crate::error::ServiceError;

pub struct AuditService<A: AuditRepository, P: WorkPermitRepository> {
    audit_repo: A,
    permit_repo: P,
}

impl<A: AuditRepository, P: WorkPermitRepository> AuditService<A, P> {
    pub fn new(audit_repo: A, permit_repo: P) -> Self {
        Self {
            audit_repo,
            permit_repo,
        }
    }

    /// Record a checklist. Only administrators audit, and only permits
    /// that were approved.
    pub async fn record(&self, auditor: &User, input: CreatePermitAudit) -> PermitResult<()> {
        if !auditor.is_admin {
            return Err(ServiceError::NotAdmin.into());
        }
        let permit = self.permit_repo.get_by_id(input.permit_id).await?;
        if permit.status != PermitStatus::Approved {
            return Err(ServiceError::NotApproved(permit.status).into());
        }
        self.audit_repo
            .create(CreatePermitAudit {
                audited_by: auditor.user_id,
                ..input
            })
            .await
    }

    /// The audit to show for a permit, if any was recorded.
    pub async fn latest(&self, permit_id: i64) -> PermitResult<Option<PermitAudit>> {
        Ok(latest_audit(self.audit_repo.list_by_permit(permit_id).await?))
    }
}
