//! Repository implementations backed by the remote data service.

mod audit;
mod document;
mod permit;
mod reference;
mod user;

pub use audit::RemoteAuditRepository;
pub use document::RemoteDocumentRepository;
pub use permit::RemoteWorkPermitRepository;
pub use reference::RemoteReferenceRepository;
pub use user::RemoteUserRepository;
