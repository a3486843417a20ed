//! In-process fakes for the service tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use permit_core::error::{PermitError, PermitResult};
use permit_core::models::audit::{CreatePermitAudit, PermitAudit};
use permit_core::models::document::{CreatePermitDocument, PermitDocument};
use permit_core::models::permit::{CreateWorkPermit, CreatedPermit, PermitStatus, WorkPermit};
use permit_core::models::user::User;
use permit_core::repository::{AuditRepository, DocumentRepository, WorkPermitRepository};
use permit_service::notify::Notifier;
use permit_service::storage::ObjectStore;
use tokio::sync::mpsc;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn admin() -> User {
    User {
        user_id: 1,
        line_user_id: "U-admin".into(),
        company_name: "Airport".into(),
        department: Some("Safety".into()),
        full_name: "Niran Admin".into(),
        phone_number: "0800000000".into(),
        email: None,
        is_admin: true,
        is_active: true,
    }
}

pub fn contractor() -> User {
    User {
        user_id: 7,
        line_user_id: "U-owner".into(),
        company_name: "Acme Co".into(),
        department: None,
        full_name: "Somchai".into(),
        phone_number: "0812345678".into(),
        email: None,
        is_admin: false,
        is_active: true,
    }
}

pub fn submission(start: NaiveDate, end: NaiveDate) -> CreateWorkPermit {
    CreateWorkPermit {
        user_id: 7,
        owner_name: "Somchai".into(),
        company_name: "Acme Co".into(),
        area_id: 1,
        work_type_id: 2,
        work_shift: "08:00-17:00".into(),
        start_date: start,
        end_date: end,
        remarks: None,
    }
}

#[derive(Default)]
struct PermitStore {
    permits: Vec<WorkPermit>,
    submissions: Vec<CreateWorkPermit>,
    updates: Vec<(i64, PermitStatus, i64)>,
}

/// Permits kept in memory, shaped like rows of the permit view.
#[derive(Clone, Default)]
pub struct MemoryPermits {
    inner: Arc<Mutex<PermitStore>>,
}

impl MemoryPermits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, id: i64, status: PermitStatus, start: NaiveDate, end: NaiveDate) {
        let mut store = self.inner.lock().unwrap();
        store.permits.push(WorkPermit {
            permit_id: id,
            permit_number: format!("WP-{id:04}"),
            user_id: 7,
            line_user_id: Some("U-owner".into()),
            owner_name: "Somchai".into(),
            company_name: "Acme Co".into(),
            area_id: 1,
            area_name: Some("Apron".into()),
            work_type_id: 2,
            work_type_name: Some("Hot work".into()),
            work_shift: "08:00-17:00".into(),
            start_date: start,
            end_date: end,
            status,
            remarks: None,
            created_date: None,
            updated_date: None,
            document_count: None,
        });
    }

    pub fn submissions(&self) -> Vec<CreateWorkPermit> {
        self.inner.lock().unwrap().submissions.clone()
    }

    pub fn updates(&self) -> Vec<(i64, PermitStatus, i64)> {
        self.inner.lock().unwrap().updates.clone()
    }
}

impl WorkPermitRepository for MemoryPermits {
    async fn create(&self, input: CreateWorkPermit) -> PermitResult<CreatedPermit> {
        let id = {
            let store = self.inner.lock().unwrap();
            store.permits.len() as i64 + 1
        };
        self.seed(id, PermitStatus::Pending, input.start_date, input.end_date);
        self.inner.lock().unwrap().submissions.push(input);
        Ok(CreatedPermit {
            permit_id: id,
            permit_number: format!("WP-{id:04}"),
        })
    }

    async fn get_by_id(&self, permit_id: i64) -> PermitResult<WorkPermit> {
        self.inner
            .lock()
            .unwrap()
            .permits
            .iter()
            .find(|p| p.permit_id == permit_id)
            .cloned()
            .ok_or_else(|| PermitError::not_found("WorkPermit", permit_id))
    }

    async fn list_by_user(&self, user_id: i64) -> PermitResult<Vec<WorkPermit>> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .permits
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> PermitResult<Vec<WorkPermit>> {
        Ok(self.inner.lock().unwrap().permits.clone())
    }

    async fn update_status(
        &self,
        permit_id: i64,
        status: PermitStatus,
        reviewed_by: i64,
    ) -> PermitResult<()> {
        let mut store = self.inner.lock().unwrap();
        store.updates.push((permit_id, status, reviewed_by));
        if let Some(p) = store.permits.iter_mut().find(|p| p.permit_id == permit_id) {
            p.status = status;
        }
        Ok(())
    }
}

/// Documents in memory; attaching fails for names listed in `reject`.
#[derive(Clone, Default)]
pub struct MemoryDocuments {
    docs: Arc<Mutex<Vec<CreatePermitDocument>>>,
    reject: Arc<Mutex<Vec<String>>>,
}

impl MemoryDocuments {
    pub fn rejecting(name: &str) -> Self {
        let docs = Self::default();
        docs.reject.lock().unwrap().push(name.to_string());
        docs
    }

    pub fn attached(&self) -> Vec<CreatePermitDocument> {
        self.docs.lock().unwrap().clone()
    }
}

impl DocumentRepository for MemoryDocuments {
    async fn list_by_permit(&self, permit_id: i64) -> PermitResult<Vec<PermitDocument>> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.permit_id == permit_id)
            .map(|d| PermitDocument {
                document_id: None,
                permit_id: d.permit_id,
                document_name: d.document_name.clone(),
                document_path: d.document_path.clone(),
                document_type: d.document_type.clone(),
                file_size: d.file_size,
                uploaded_date: None,
            })
            .collect())
    }

    async fn add(&self, input: CreatePermitDocument) -> PermitResult<()> {
        if self.reject.lock().unwrap().contains(&input.document_name) {
            return Err(PermitError::Upstream {
                status: 500,
                message: "Procedure usp_AddPermitDocument failed".into(),
                details: String::new(),
            });
        }
        self.docs.lock().unwrap().push(input);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryAudits {
    audits: Arc<Mutex<Vec<PermitAudit>>>,
}

impl MemoryAudits {
    pub fn recorded(&self) -> Vec<PermitAudit> {
        self.audits.lock().unwrap().clone()
    }

    pub fn push(&self, audit: PermitAudit) {
        self.audits.lock().unwrap().push(audit);
    }
}

impl AuditRepository for MemoryAudits {
    async fn create(&self, input: CreatePermitAudit) -> PermitResult<()> {
        let mut audits = self.audits.lock().unwrap();
        let id = audits.len() as i64 + 1;
        audits.push(PermitAudit {
            audit_id: Some(id),
            permit_id: input.permit_id,
            audited_by: input.audited_by,
            audited_by_name: None,
            audit_date: None,
            remarks: input.remarks,
            checks: input.checks,
        });
        Ok(())
    }

    async fn list_by_permit(&self, permit_id: i64) -> PermitResult<Vec<PermitAudit>> {
        Ok(self
            .audits
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.permit_id == permit_id)
            .cloned()
            .collect())
    }
}

/// Forwards every push to a channel the test can read.
#[derive(Clone)]
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<(String, String)>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for RecordingNotifier {
    async fn push(&self, to: &str, text: String) -> PermitResult<()> {
        let _ = self.tx.send((to.to_string(), text));
        Ok(())
    }
}

/// Object store that keeps blobs in a map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> PermitResult<String> {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(format!("https://files.example/{key}"))
    }
}
