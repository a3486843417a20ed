//! Permit submission, listing and decisions.

use std::sync::Arc;

use chrono::NaiveDate;
use permit_core::error::PermitResult;
use permit_core::models::permit::{CreateWorkPermit, CreatedPermit, PermitStatus, WorkPermit};
use permit_core::models::user::User;
use permit_core::repository::{PaginatedResult, Pagination, WorkPermitRepository, filter_by_date};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::notify::{DecisionNotice, NewPermitNotice, Notifier};

/// One page of the admin list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitOverview {
    pub permits: PaginatedResult<WorkPermit>,
    /// 1-based page number actually shown.
    pub page: u64,
    pub total_pages: u64,
    /// Pending permits in the filtered set, across all pages.
    pub pending_count: usize,
}

pub struct PermitService<P: WorkPermitRepository, N: Notifier> {
    permit_repo: Arc<P>,
    notifier: Arc<N>,
    config: ServiceConfig,
}

impl<P, N> PermitService<P, N>
where
    P: WorkPermitRepository + 'static,
    N: Notifier,
{
    pub fn new(permit_repo: P, notifier: N, config: ServiceConfig) -> Self {
        Self {
            permit_repo: Arc::new(permit_repo),
            notifier: Arc::new(notifier),
            config,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    /// Validate and create a permit, then tell the administrator about it
    /// in the background. A failed push does not fail the submission.
    pub async fn submit(&self, input: CreateWorkPermit) -> PermitResult<CreatedPermit> {
        input.validate()?;
        let fallback = NewPermitNotice {
            permit_number: None,
            owner_name: input.owner_name.clone(),
            company_name: input.company_name.clone(),
            area: None,
            work_type: None,
            work_shift: input.work_shift.clone(),
            start_date: Some(input.start_date),
            end_date: Some(input.end_date),
        };

        let created = self.permit_repo.create(input).await?;
        info!(permit_id = created.permit_id, "Permit submitted");

        let admin = self.config.notify.admin_line_id.clone();
        if admin.is_empty() {
            warn!("No administrator chat id configured, skipping new-permit notice");
            return Ok(created);
        }

        let repo = Arc::clone(&self.permit_repo);
        let notifier = Arc::clone(&self.notifier);
        let liff_url = self.config.notify.liff_url.clone();
        let permit_id = created.permit_id;
        let permit_number = created.permit_number.clone();
        tokio::spawn(async move {
            // The view row carries the area and work type names.
            let notice = match repo.get_by_id(permit_id).await {
                Ok(permit) => NewPermitNotice::from(&permit),
                Err(e) => {
                    warn!(permit_id, error = %e, "Could not load permit for notice");
                    NewPermitNotice {
                        permit_number: Some(permit_number),
                        ..fallback
                    }
                }
            };
            if let Err(e) = notifier.push(&admin, notice.message(&liff_url)).await {
                warn!(permit_id, error = %e, "New-permit notice failed");
            }
        });

        Ok(created)
    }

    /// A user's permits, newest first, optionally narrowed to those
    /// covering `date`.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        date: Option<NaiveDate>,
    ) -> PermitResult<Vec<WorkPermit>> {
        let permits = self.permit_repo.list_by_user(user_id).await?;
        Ok(filter_by_date(permits, date))
    }

    /// The admin list: pending first, filtered by date, one page of it.
    pub async fn list_all(&self, date: Option<NaiveDate>, page: u64) -> PermitResult<PermitOverview> {
        let permits = filter_by_date(self.permit_repo.list_all().await?, date);
        let pending_count = permits
            .iter()
            .filter(|p| p.status == PermitStatus::Pending)
            .count();

        let page = page.max(1);
        let permits = PaginatedResult::from_vec(
            permits,
            &Pagination::page(page, self.config.page_size),
        );
        Ok(PermitOverview {
            total_pages: permits.total_pages(),
            page,
            pending_count,
            permits,
        })
    }

    /// Approve or reject a pending permit and notify its owner.
    pub async fn decide(
        &self,
        permit_id: i64,
        decision: PermitStatus,
        reviewer: &User,
    ) -> PermitResult<WorkPermit> {
        if !reviewer.is_admin {
            return Err(ServiceError::NotAdmin.into());
        }
        if !matches!(decision, PermitStatus::Approved | PermitStatus::Rejected) {
            return Err(ServiceError::InvalidDecision(decision).into());
        }

        let mut permit = self.permit_repo.get_by_id(permit_id).await?;
        if permit.status != PermitStatus::Pending {
            return Err(ServiceError::PermitClosed(permit.status).into());
        }

        self.permit_repo
            .update_status(permit_id, decision, reviewer.user_id)
            .await?;
        permit.status = decision;
        info!(
            permit_id,
            status = %decision,
            reviewer = reviewer.user_id,
            "Permit decided"
        );

        match permit.line_user_id.clone().filter(|id| !id.is_empty()) {
            Some(owner) => {
                let notice =
                    DecisionNotice::for_permit(&permit, owner, decision, &reviewer.full_name);
                let notifier = Arc::clone(&self.notifier);
                tokio::spawn(async move {
                    if let Err(e) = notifier.push(&notice.line_user_id, notice.message()).await {
                        warn!(permit_id, error = %e, "Decision notice failed");
                    }
                });
            }
            None => warn!(permit_id, "Permit owner has no chat id, skipping decision notice"),
        }

        Ok(permit)
    }
}
