//! Repository trait definitions for data access abstraction.
//!
//! Every operation maps to a single remote procedure or parameterized
//! query. All repository operations are async.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::PermitResult;
use crate::models::{
    audit::{CreatePermitAudit, PermitAudit},
    document::{CreatePermitDocument, PermitDocument},
    permit::{CreateWorkPermit, CreatedPermit, PermitStatus, WorkPermit},
    reference::{Area, WorkType},
    user::{RegisterUser, RenamedUser, User},
};

/// Pagination parameters for list views.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
        }
    }
}

impl Pagination {
    /// 1-based page number; page 0 is treated as page 1.
    pub fn page(number: u64, size: u64) -> Self {
        Self {
            offset: number.saturating_sub(1).saturating_mul(size),
            limit: size,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> PaginatedResult<T> {
    /// Slice an already fetched list. The data service has no paging of
    /// its own, so list views page in memory.
    pub fn from_vec(items: Vec<T>, pagination: &Pagination) -> Self {
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(usize::try_from(pagination.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(pagination.limit).unwrap_or(usize::MAX))
            .collect();
        Self {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }
}

/// Keep only permits whose work period covers `date`.
pub fn filter_by_date(permits: Vec<WorkPermit>, date: Option<NaiveDate>) -> Vec<WorkPermit> {
    match date {
        Some(date) => permits.into_iter().filter(|p| p.covers(date)).collect(),
        None => permits,
    }
}

pub trait UserRepository: Send + Sync {
    fn register(&self, input: RegisterUser) -> impl Future<Output = PermitResult<User>> + Send;
    fn get_by_line_id(
        &self,
        line_user_id: &str,
    ) -> impl Future<Output = PermitResult<User>> + Send;
    fn update_full_name(
        &self,
        user_id: i64,
        full_name: &str,
    ) -> impl Future<Output = PermitResult<RenamedUser>> + Send;
}

pub trait ReferenceRepository: Send + Sync {
    fn list_areas(&self) -> impl Future<Output = PermitResult<Vec<Area>>> + Send;
    fn list_work_types(&self) -> impl Future<Output = PermitResult<Vec<WorkType>>> + Send;
}

pub trait WorkPermitRepository: Send + Sync {
    fn create(
        &self,
        input: CreateWorkPermit,
    ) -> impl Future<Output = PermitResult<CreatedPermit>> + Send;
    fn get_by_id(&self, permit_id: i64) -> impl Future<Output = PermitResult<WorkPermit>> + Send;
    /// A user's permits, newest first.
    fn list_by_user(
        &self,
        user_id: i64,
    ) -> impl Future<Output = PermitResult<Vec<WorkPermit>>> + Send;
    /// Every permit: pending first, then approved, rejected, the rest;
    /// newest first within each group.
    fn list_all(&self) -> impl Future<Output = PermitResult<Vec<WorkPermit>>> + Send;
    fn update_status(
        &self,
        permit_id: i64,
        status: PermitStatus,
        reviewed_by: i64,
    ) -> impl Future<Output = PermitResult<()>> + Send;
}

pub trait DocumentRepository: Send + Sync {
    fn list_by_permit(
        &self,
        permit_id: i64,
    ) -> impl Future<Output = PermitResult<Vec<PermitDocument>>> + Send;
    fn add(&self, input: CreatePermitDocument) -> impl Future<Output = PermitResult<()>> + Send;
}

pub trait AuditRepository: Send + Sync {
    fn create(&self, input: CreatePermitAudit) -> impl Future<Output = PermitResult<()>> + Send;
    fn list_by_permit(
        &self,
        permit_id: i64,
    ) -> impl Future<Output = PermitResult<Vec<PermitAudit>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_one_based() {
        let p = Pagination::page(3, 10);
        assert_eq!(p.offset, 20);
        assert_eq!(p.limit, 10);
        assert_eq!(Pagination::page(0, 10).offset, 0);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let p = Pagination::page(u64::MAX, 10);
        assert_eq!(p.offset, u64::MAX);
        let page = PaginatedResult::from_vec(vec![1, 2, 3], &p);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn from_vec_slices_and_counts() {
        let page = PaginatedResult::from_vec((1..=23).collect::<Vec<_>>(), &Pagination::page(3, 10));
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages(), 3);
    }
}
