use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub service_id: Uuid,
    pub employer_id: Uuid,
    pub location: Option<String>,
}
