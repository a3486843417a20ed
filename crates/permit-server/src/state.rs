//! Shared application state.

use std::sync::Arc;

use permit_core::error::{PermitError, PermitResult};
use permit_db::repository::{
    RemoteAuditRepository, RemoteDocumentRepository, RemoteReferenceRepository,
    RemoteUserRepository, RemoteWorkPermitRepository,
};
use permit_db::{DataClient, HttpTransport};
use permit_service::{
    AuditService, DocumentService, LinePushNotifier, LocalObjectStore, PermitService,
    RegistrationService,
};

use crate::config::ServerConfig;

pub type Client = DataClient<HttpTransport>;

pub struct AppState {
    pub config: ServerConfig,
    /// Used directly by the forwarder; the repositories share its pacing
    /// gate and cache.
    pub client: Client,
    pub notifier: LinePushNotifier,
    pub registration: RegistrationService<RemoteUserRepository<HttpTransport>>,
    pub reference: RemoteReferenceRepository<HttpTransport>,
    pub permits: PermitService<RemoteWorkPermitRepository<HttpTransport>, LinePushNotifier>,
    pub documents: DocumentService<RemoteDocumentRepository<HttpTransport>, LocalObjectStore>,
    pub audits: AuditService<RemoteAuditRepository<HttpTransport>, RemoteWorkPermitRepository<HttpTransport>>,
    /// Unchecked audit writes and reads for the audit endpoint.
    pub audit_log: RemoteAuditRepository<HttpTransport>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: ServerConfig) -> PermitResult<SharedState> {
        let transport = HttpTransport::new(&config.data).map_err(PermitError::from)?;
        let client = DataClient::new(transport, config.data.clone());
        let notifier = LinePushNotifier::new(&config.service.notify)?;
        let store = LocalObjectStore::new(&config.upload_dir, config.public_upload_url.clone());

        Ok(Arc::new(Self {
            registration: RegistrationService::new(RemoteUserRepository::new(client.clone())),
            reference: RemoteReferenceRepository::new(client.clone()),
            permits: PermitService::new(
                RemoteWorkPermitRepository::new(client.clone()),
                notifier.clone(),
                config.service.clone(),
            ),
            documents: DocumentService::new(
                RemoteDocumentRepository::new(client.clone()),
                store,
                config.service.upload.clone(),
            ),
            audits: AuditService::new(
                RemoteAuditRepository::new(client.clone()),
                RemoteWorkPermitRepository::new(client.clone()),
            ),
            audit_log: RemoteAuditRepository::new(client.clone()),
            notifier,
            client,
            config,
        }))
    }
}
