//! Remote implementation of [`ReferenceRepository`].

use permit_core::error::PermitResult;
use permit_core::models::reference::{Area, WorkType};
use permit_core::repository::ReferenceRepository;

use crate::client::DataClient;
use crate::payload::Params;
use crate::transport::Transport;

pub struct RemoteReferenceRepository<T> {
    client: DataClient<T>,
}

impl<T: Transport> RemoteReferenceRepository<T> {
    pub fn new(client: DataClient<T>) -> Self {
        Self { client }
    }
}

impl<T: Transport> ReferenceRepository for RemoteReferenceRepository<T> {
    async fn list_areas(&self) -> PermitResult<Vec<Area>> {
        Ok(self
            .client
            .query_rows("SELECT * FROM vw_ActiveAreas ORDER BY AreaName", Params::new())
            .await?)
    }

    async fn list_work_types(&self) -> PermitResult<Vec<WorkType>> {
        Ok(self
            .client
            .query_rows(
                "SELECT * FROM vw_ActiveWorkTypes ORDER BY WorkTypeName",
                Params::new(),
            )
            .await?)
    }
}
