use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RegisterEmployerPayload {
    /// `individual` or `organization`; omitted means unspecified.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub organization_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tax_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterProfessionalPayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    #[validate(length(min = 1))]
    pub tax_id: String,
    #[serde(default)]
    pub services: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignServicesPayload {
    pub service_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignServicesResponse {
    pub assigned: bool,
}
