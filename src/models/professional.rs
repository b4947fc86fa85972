use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::service::Service;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Education {
    #[validate(length(min = 1))]
    pub degree: String,
    #[validate(length(min = 1))]
    pub institution: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct WorkExperience {
    #[validate(length(min = 1))]
    pub job_title: String,
    #[validate(length(min = 1))]
    pub company: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

/// Stored professional. `services` are weak references into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub tax_id: Option<String>,
    pub services: Vec<Uuid>,
    pub education: Vec<Education>,
    pub work_experience: Vec<WorkExperience>,
}

pub fn full_name(first_name: &str, last_name: Option<&str>) -> String {
    [Some(first_name), last_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Professional with service references resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfessionalView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub tax_id: Option<String>,
    pub services: Vec<Service>,
    pub education: Vec<Education>,
    pub work_experience: Vec<WorkExperience>,
}

impl ProfessionalView {
    /// Keeps the professional's own ordering; ids missing from `resolved` are dropped.
    pub fn resolve(professional: Professional, resolved: &[Service]) -> Self {
        let services = professional
            .services
            .iter()
            .filter_map(|id| resolved.iter().find(|s| s.id == *id).cloned())
            .collect();

        Self {
            id: professional.id,
            first_name: professional.first_name,
            last_name: professional.last_name,
            email: professional.email,
            gender: professional.gender,
            tax_id: professional.tax_id,
            services,
            education: professional.education,
            work_experience: professional.work_experience,
        }
    }
}
