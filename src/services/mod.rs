pub mod application_service;
pub mod catalog_service;
pub mod registry_service;
pub mod report_service;
pub mod vacancy_service;
