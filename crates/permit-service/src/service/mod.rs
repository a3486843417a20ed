//! Permit flows, each generic over the repositories it needs so that this
//! crate has no dependency on the data-service client.

mod audit;
mod document;
mod permit;
mod registration;

pub use audit::AuditService;
pub use document::{DocumentService, StoredFile, UploadFile, UploadReport};
pub use permit::{PermitOverview, PermitService};
pub use registration::RegistrationService;
