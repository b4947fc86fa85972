//! Storage ports the core consumes. One trait per entity type.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    application::Application,
    employer::Employer,
    professional::{Education, Professional, WorkExperience},
    service::Service,
    vacancy::Vacancy,
};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. Carries the constraint name.
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn insert_service(&self, service: &Service) -> StoreResult<()>;
    async fn find_service(&self, id: Uuid) -> StoreResult<Option<Service>>;
    /// Unknown ids are skipped.
    async fn find_services(&self, ids: &[Uuid]) -> StoreResult<Vec<Service>>;
    async fn list_services(&self) -> StoreResult<Vec<Service>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployerStore: Send + Sync {
    async fn insert_employer(&self, employer: &Employer) -> StoreResult<()>;
    async fn find_employer(&self, id: Uuid) -> StoreResult<Option<Employer>>;
    async fn find_employers(&self, ids: &[Uuid]) -> StoreResult<Vec<Employer>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalStore: Send + Sync {
    async fn insert_professional(&self, professional: &Professional) -> StoreResult<()>;
    async fn find_professional(&self, id: Uuid) -> StoreResult<Option<Professional>>;
    async fn list_professionals(&self) -> StoreResult<Vec<Professional>>;

    // Single-document updates; each returns the number of matched professionals.
    async fn set_services(&self, id: Uuid, service_ids: &[Uuid]) -> StoreResult<u64>;
    async fn push_education(&self, id: Uuid, record: &Education) -> StoreResult<u64>;
    async fn push_work_experience(&self, id: Uuid, record: &WorkExperience) -> StoreResult<u64>;

    /// Services unwound across professionals: `(service_id, professionals referencing it)`.
    async fn count_by_service(&self) -> StoreResult<Vec<(Uuid, i64)>>;
    /// `(gender, professionals)`; `None` groups professionals without a gender.
    async fn count_by_gender(&self) -> StoreResult<Vec<(Option<String>, i64)>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancyStore: Send + Sync {
    async fn insert_vacancy(&self, vacancy: &Vacancy) -> StoreResult<()>;
    async fn find_vacancy(&self, id: Uuid) -> StoreResult<Option<Vacancy>>;
    /// Most recent `created_at` first.
    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>>;
    async fn count_by_employer(&self, employer_id: Uuid) -> StoreResult<i64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the (professional, vacancy) pair exists.
    async fn insert_application(&self, application: &Application) -> StoreResult<()>;
    /// Applications of `professional_id` with `from <= applied_at <= to`.
    async fn count_applied_between(
        &self,
        professional_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<i64>;
    /// `(first_name, last_name)` of every applicant to a vacancy tagged with `service_id`.
    async fn applicant_names(&self, service_id: Uuid) -> StoreResult<Vec<(String, Option<String>)>>;
}

/// Full storage backend handed to [`crate::AppState`].
#[async_trait]
pub trait Store:
    ServiceStore + EmployerStore + ProfessionalStore + VacancyStore + ApplicationStore
{
    /// Establishes tables, indexes and constraints. Called once before first use.
    async fn prepare(&self) -> StoreResult<()>;
}

/// Name of the (professional_id, vacancy_id) uniqueness constraint.
pub const APPLICATION_UNIQUE_CONSTRAINT: &str = "uq_application_unique";
