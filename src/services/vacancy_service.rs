use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::store::{EmployerStore, ServiceStore, VacancyStore};
use crate::dto::{non_blank, require_non_blank, vacancy_dto::CreateVacancyPayload};
use crate::error::{Error, Result};
use crate::models::{
    employer::Employer,
    service::Service,
    vacancy::{Vacancy, VacancyView},
};
use crate::utils::time::Clock;

#[derive(Clone)]
pub struct VacancyService {
    vacancies: Arc<dyn VacancyStore>,
    services: Arc<dyn ServiceStore>,
    employers: Arc<dyn EmployerStore>,
    clock: Arc<dyn Clock>,
}

impl VacancyService {
    pub fn new(
        vacancies: Arc<dyn VacancyStore>,
        services: Arc<dyn ServiceStore>,
        employers: Arc<dyn EmployerStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vacancies,
            services,
            employers,
            clock,
        }
    }

    pub async fn create(&self, payload: CreateVacancyPayload) -> Result<VacancyView> {
        payload.validate()?;
        let title = require_non_blank("title", &payload.title)?;

        let (service, employer) = tokio::try_join!(
            self.services.find_service(payload.service_id),
            self.employers.find_employer(payload.employer_id),
        )?;
        let service = service.ok_or_else(|| {
            Error::NotFound(format!("service {} not found", payload.service_id))
        })?;
        let employer = employer.ok_or_else(|| {
            Error::NotFound(format!("employer {} not found", payload.employer_id))
        })?;

        let vacancy = Vacancy {
            id: Uuid::new_v4(),
            title,
            service_id: service.id,
            employer_id: employer.id,
            location: non_blank(payload.location.as_deref()),
            created_at: self.clock.now(),
        };
        self.vacancies.insert_vacancy(&vacancy).await?;

        tracing::info!(
            vacancy_id = %vacancy.id,
            service_id = %service.id,
            employer_id = %employer.id,
            "Vacancy created"
        );
        Ok(to_view(vacancy, service, &employer))
    }

    /// Most recently created first.
    pub async fn list(&self) -> Result<Vec<VacancyView>> {
        let vacancies = self.vacancies.list_vacancies().await?;

        let service_ids = distinct(vacancies.iter().map(|v| v.service_id));
        let employer_ids = distinct(vacancies.iter().map(|v| v.employer_id));
        let (services, employers) = tokio::try_join!(
            self.services.find_services(&service_ids),
            self.employers.find_employers(&employer_ids),
        )?;
        let services: HashMap<Uuid, Service> = services.into_iter().map(|s| (s.id, s)).collect();
        let employers: HashMap<Uuid, Employer> =
            employers.into_iter().map(|e| (e.id, e)).collect();

        let mut views = Vec::with_capacity(vacancies.len());
        for vacancy in vacancies {
            let (Some(service), Some(employer)) = (
                services.get(&vacancy.service_id),
                employers.get(&vacancy.employer_id),
            ) else {
                tracing::warn!(vacancy_id = %vacancy.id, "Vacancy references missing service or employer");
                continue;
            };
            views.push(to_view(vacancy, service.clone(), employer));
        }
        Ok(views)
    }
}

fn to_view(vacancy: Vacancy, service: Service, employer: &Employer) -> VacancyView {
    VacancyView {
        id: vacancy.id,
        title: vacancy.title,
        service,
        employer: employer.display_name(),
        location: vacancy.location,
        created_at: vacancy.created_at,
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
