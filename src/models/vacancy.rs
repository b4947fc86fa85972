use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::service::Service;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
    pub title: String,
    pub service_id: Uuid,
    pub employer_id: Uuid,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VacancyView {
    pub id: Uuid,
    pub title: String,
    pub service: Service,
    /// Employer display name.
    pub employer: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}
