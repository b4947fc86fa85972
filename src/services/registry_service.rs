use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::store::{EmployerStore, ProfessionalStore, VacancyStore};
use crate::dto::{
    non_blank,
    registry_dto::{RegisterEmployerPayload, RegisterProfessionalPayload},
    require_non_blank,
};
use crate::error::{Error, Result};
use crate::models::{
    employer::{Employer, EmployerKind, EmployerSummary},
    professional::{Education, Professional, ProfessionalView, WorkExperience},
};
use crate::services::catalog_service::CatalogService;

/// Employers and professionals.
#[derive(Clone)]
pub struct RegistryService {
    employers: Arc<dyn EmployerStore>,
    professionals: Arc<dyn ProfessionalStore>,
    vacancies: Arc<dyn VacancyStore>,
    catalog: CatalogService,
}

impl RegistryService {
    pub fn new(
        employers: Arc<dyn EmployerStore>,
        professionals: Arc<dyn ProfessionalStore>,
        vacancies: Arc<dyn VacancyStore>,
        catalog: CatalogService,
    ) -> Self {
        Self {
            employers,
            professionals,
            vacancies,
            catalog,
        }
    }

    pub async fn register_employer(
        &self,
        payload: RegisterEmployerPayload,
    ) -> Result<EmployerSummary> {
        let kind = match payload.kind.as_deref() {
            Some(tag) => tag.parse::<EmployerKind>().map_err(Error::Validation)?,
            None => EmployerKind::Unspecified,
        };
        let organization_name = non_blank(payload.organization_name.as_deref());
        let first_name = non_blank(payload.first_name.as_deref());
        let last_name = non_blank(payload.last_name.as_deref());

        if organization_name.is_none() && first_name.is_none() && last_name.is_none() {
            return Err(Error::Validation(
                "either organization_name or first_name/last_name is required".to_string(),
            ));
        }

        let employer = Employer {
            id: Uuid::new_v4(),
            kind,
            organization_name,
            first_name,
            last_name,
            tax_id: non_blank(payload.tax_id.as_deref()),
        };
        self.employers.insert_employer(&employer).await?;

        tracing::info!(employer_id = %employer.id, kind = %employer.kind, "Employer registered");
        Ok(EmployerSummary::new(&employer, 0))
    }

    /// Counts vacancies at read time; the find and the count are separate reads.
    pub async fn employer_summary(&self, employer_id: Uuid) -> Result<Option<EmployerSummary>> {
        let Some(employer) = self.employers.find_employer(employer_id).await? else {
            return Ok(None);
        };
        let offered = self.vacancies.count_by_employer(employer.id).await?;
        Ok(Some(EmployerSummary::new(&employer, offered)))
    }

    /// Referenced services are not checked for existence.
    pub async fn register_professional(
        &self,
        payload: RegisterProfessionalPayload,
    ) -> Result<ProfessionalView> {
        payload.validate()?;

        let professional = Professional {
            id: Uuid::new_v4(),
            first_name: require_non_blank("first_name", &payload.first_name)?,
            last_name: non_blank(payload.last_name.as_deref()),
            email: non_blank(payload.email.as_deref()),
            gender: non_blank(payload.gender.as_deref()),
            tax_id: Some(require_non_blank("tax_id", &payload.tax_id)?),
            services: dedup(payload.services),
            education: Vec::new(),
            work_experience: Vec::new(),
        };
        self.professionals.insert_professional(&professional).await?;

        tracing::info!(
            professional_id = %professional.id,
            services = professional.services.len(),
            "Professional registered"
        );
        self.view(professional).await
    }

    /// Replaces the whole service set.
    pub async fn assign_services(&self, professional_id: Uuid, service_ids: Vec<Uuid>) -> Result<bool> {
        let service_ids = dedup(service_ids);
        let matched = self
            .professionals
            .set_services(professional_id, &service_ids)
            .await?;
        if matched == 0 {
            return Err(professional_not_found(professional_id));
        }

        tracing::info!(%professional_id, services = service_ids.len(), "Services assigned");
        Ok(true)
    }

    pub async fn add_education(
        &self,
        professional_id: Uuid,
        record: Education,
    ) -> Result<ProfessionalView> {
        record.validate()?;
        let matched = self.professionals.push_education(professional_id, &record).await?;
        if matched == 0 {
            return Err(professional_not_found(professional_id));
        }
        self.reload(professional_id).await
    }

    pub async fn add_work_experience(
        &self,
        professional_id: Uuid,
        record: WorkExperience,
    ) -> Result<ProfessionalView> {
        record.validate()?;
        let matched = self
            .professionals
            .push_work_experience(professional_id, &record)
            .await?;
        if matched == 0 {
            return Err(professional_not_found(professional_id));
        }
        self.reload(professional_id).await
    }

    pub async fn get_professional(&self, professional_id: Uuid) -> Result<Option<ProfessionalView>> {
        match self.professionals.find_professional(professional_id).await? {
            Some(professional) => Ok(Some(self.view(professional).await?)),
            None => Ok(None),
        }
    }

    pub async fn list_professionals(&self) -> Result<Vec<ProfessionalView>> {
        let professionals = self.professionals.list_professionals().await?;
        let referenced = dedup(
            professionals
                .iter()
                .flat_map(|p| p.services.iter().copied())
                .collect(),
        );
        let services = self.catalog.resolve_services(&referenced).await?;

        Ok(professionals
            .into_iter()
            .map(|p| ProfessionalView::resolve(p, &services))
            .collect())
    }

    async fn reload(&self, professional_id: Uuid) -> Result<ProfessionalView> {
        self.get_professional(professional_id)
            .await?
            .ok_or_else(|| professional_not_found(professional_id))
    }

    async fn view(&self, professional: Professional) -> Result<ProfessionalView> {
        let services = self.catalog.resolve_services(&professional.services).await?;
        Ok(ProfessionalView::resolve(professional, &services))
    }
}

fn professional_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("professional {} not found", id))
}

/// Drops repeated ids, keeping first occurrences in order.
fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
