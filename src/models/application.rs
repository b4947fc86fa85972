use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub vacancy_id: Uuid,
    pub applied_at: DateTime<Utc>,
}
