pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::Store;
use crate::services::{
    application_service::ApplicationService, catalog_service::CatalogService,
    registry_service::RegistryService, report_service::ReportService,
    vacancy_service::VacancyService,
};
use crate::utils::time::Clock;

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
    pub registry_service: RegistryService,
    pub vacancy_service: VacancyService,
    pub application_service: ApplicationService,
    pub report_service: ReportService,
}

impl AppState {
    /// Wires every component to the same injected store and clock.
    pub fn new<S>(store: Arc<S>, clock: Arc<dyn Clock>, monthly_application_limit: usize) -> Self
    where
        S: Store + 'static,
    {
        let catalog_service = CatalogService::new(store.clone());
        let registry_service = RegistryService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            catalog_service.clone(),
        );
        let vacancy_service =
            VacancyService::new(store.clone(), store.clone(), store.clone(), clock.clone());
        let application_service =
            ApplicationService::new(store.clone(), store.clone(), store.clone(), clock)
                .with_monthly_limit(monthly_application_limit);
        let report_service = ReportService::new(store.clone(), store.clone(), store);

        Self {
            catalog_service,
            registry_service,
            vacancy_service,
            application_service,
            report_service,
        }
    }
}
