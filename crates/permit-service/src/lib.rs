//! Permit Service: registration, permit submission and review,
//! attachments, audits and chat notifications.

pub mod config;
pub mod error;
pub mod notify;
pub mod service;
pub mod storage;

pub use config::{NotifyConfig, ServiceConfig, UploadPolicy};
pub use error::ServiceError;
pub use notify::{DecisionNotice, LinePushNotifier, NewPermitNotice, Notifier};
pub use service::{
    AuditService, DocumentService, PermitOverview, PermitService, RegistrationService,
    StoredFile, UploadFile, UploadReport,
};
pub use storage::{LocalObjectStore, ObjectStore};
