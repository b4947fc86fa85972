use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EmployerKind {
    Individual,
    Organization,
    #[default]
    Unspecified,
}

impl EmployerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployerKind::Individual => "individual",
            EmployerKind::Organization => "organization",
            EmployerKind::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for EmployerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" => Ok(EmployerKind::Individual),
            "organization" => Ok(EmployerKind::Organization),
            "unspecified" | "" => Ok(EmployerKind::Unspecified),
            other => Err(format!("unknown employer type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    pub id: Uuid,
    pub kind: EmployerKind,
    pub organization_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tax_id: Option<String>,
}

impl Employer {
    /// Organization name when present, otherwise the present person-name parts.
    pub fn display_name(&self) -> String {
        if let Some(org) = self.organization_name.as_deref() {
            return org.to_string();
        }
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployerSummary {
    pub id: Uuid,
    pub name: String,
    pub tax_id: Option<String>,
    pub vacancies_offered: i64,
}

impl EmployerSummary {
    pub fn new(employer: &Employer, vacancies_offered: i64) -> Self {
        Self {
            id: employer.id,
            name: employer.display_name(),
            tax_id: employer.tax_id.clone(),
            vacancies_offered,
        }
    }
}
