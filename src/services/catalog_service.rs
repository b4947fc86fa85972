use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::store::ServiceStore;
use crate::dto::{require_non_blank, service_dto::CreateServicePayload};
use crate::error::Result;
use crate::models::service::Service;

#[derive(Clone)]
pub struct CatalogService {
    services: Arc<dyn ServiceStore>,
}

impl CatalogService {
    pub fn new(services: Arc<dyn ServiceStore>) -> Self {
        Self { services }
    }

    pub async fn create_service(&self, payload: CreateServicePayload) -> Result<Service> {
        payload.validate()?;
        let service = Service {
            id: Uuid::new_v4(),
            name: require_non_blank("name", &payload.name)?,
        };
        self.services.insert_service(&service).await?;

        tracing::info!(service_id = %service.id, name = %service.name, "Service created");
        Ok(service)
    }

    pub async fn list_services(&self) -> Result<Vec<Service>> {
        Ok(self.services.list_services().await?)
    }

    /// Resolves catalog references, dropping ids that no longer point at a service.
    pub async fn resolve_services(&self, ids: &[Uuid]) -> Result<Vec<Service>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.services.find_services(ids).await?)
    }
}
