//! Process-local backend. Every write happens under one lock, so the
//! application pair constraint is as atomic here as it is in Postgres.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::store::{
    ApplicationStore, EmployerStore, ProfessionalStore, ServiceStore, Store, StoreError,
    StoreResult, VacancyStore, APPLICATION_UNIQUE_CONSTRAINT,
};
use crate::models::{
    application::Application,
    employer::Employer,
    professional::{Education, Professional, WorkExperience},
    service::Service,
    vacancy::Vacancy,
};

#[derive(Debug, Default)]
struct Tables {
    services: Vec<Service>,
    employers: Vec<Employer>,
    professionals: Vec<Professional>,
    vacancies: Vec<Vacancy>,
    applications: Vec<Application>,
    application_pairs: HashSet<(Uuid, Uuid)>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn update_professional<F>(&self, id: Uuid, apply: F) -> StoreResult<u64>
    where
        F: FnOnce(&mut Professional),
    {
        let mut tables = self.write()?;
        match tables.professionals.iter_mut().find(|p| p.id == id) {
            Some(professional) => {
                apply(professional);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl ServiceStore for MemoryStore {
    async fn insert_service(&self, service: &Service) -> StoreResult<()> {
        self.write()?.services.push(service.clone());
        Ok(())
    }

    async fn find_service(&self, id: Uuid) -> StoreResult<Option<Service>> {
        Ok(self.read()?.services.iter().find(|s| s.id == id).cloned())
    }

    async fn find_services(&self, ids: &[Uuid]) -> StoreResult<Vec<Service>> {
        Ok(self
            .read()?
            .services
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn list_services(&self) -> StoreResult<Vec<Service>> {
        Ok(self.read()?.services.clone())
    }
}

#[async_trait]
impl EmployerStore for MemoryStore {
    async fn insert_employer(&self, employer: &Employer) -> StoreResult<()> {
        self.write()?.employers.push(employer.clone());
        Ok(())
    }

    async fn find_employer(&self, id: Uuid) -> StoreResult<Option<Employer>> {
        Ok(self.read()?.employers.iter().find(|e| e.id == id).cloned())
    }

    async fn find_employers(&self, ids: &[Uuid]) -> StoreResult<Vec<Employer>> {
        Ok(self
            .read()?
            .employers
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProfessionalStore for MemoryStore {
    async fn insert_professional(&self, professional: &Professional) -> StoreResult<()> {
        self.write()?.professionals.push(professional.clone());
        Ok(())
    }

    async fn find_professional(&self, id: Uuid) -> StoreResult<Option<Professional>> {
        Ok(self.read()?.professionals.iter().find(|p| p.id == id).cloned())
    }

    async fn list_professionals(&self) -> StoreResult<Vec<Professional>> {
        Ok(self.read()?.professionals.clone())
    }

    async fn set_services(&self, id: Uuid, service_ids: &[Uuid]) -> StoreResult<u64> {
        self.update_professional(id, |p| p.services = service_ids.to_vec())
    }

    async fn push_education(&self, id: Uuid, record: &Education) -> StoreResult<u64> {
        self.update_professional(id, |p| p.education.push(record.clone()))
    }

    async fn push_work_experience(&self, id: Uuid, record: &WorkExperience) -> StoreResult<u64> {
        self.update_professional(id, |p| p.work_experience.push(record.clone()))
    }

    async fn count_by_service(&self) -> StoreResult<Vec<(Uuid, i64)>> {
        let tables = self.read()?;
        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for service_id in tables.professionals.iter().flat_map(|p| p.services.iter()) {
            *counts.entry(*service_id).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_gender(&self) -> StoreResult<Vec<(Option<String>, i64)>> {
        let tables = self.read()?;
        let mut counts: HashMap<Option<String>, i64> = HashMap::new();
        for professional in &tables.professionals {
            *counts.entry(professional.gender.clone()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }
}

#[async_trait]
impl VacancyStore for MemoryStore {
    async fn insert_vacancy(&self, vacancy: &Vacancy) -> StoreResult<()> {
        self.write()?.vacancies.push(vacancy.clone());
        Ok(())
    }

    async fn find_vacancy(&self, id: Uuid) -> StoreResult<Option<Vacancy>> {
        Ok(self.read()?.vacancies.iter().find(|v| v.id == id).cloned())
    }

    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>> {
        let mut vacancies = self.read()?.vacancies.clone();
        vacancies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vacancies)
    }

    async fn count_by_employer(&self, employer_id: Uuid) -> StoreResult<i64> {
        let count = self
            .read()?
            .vacancies
            .iter()
            .filter(|v| v.employer_id == employer_id)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert_application(&self, application: &Application) -> StoreResult<()> {
        let mut tables = self.write()?;
        let pair = (application.professional_id, application.vacancy_id);
        if !tables.application_pairs.insert(pair) {
            return Err(StoreError::Conflict(APPLICATION_UNIQUE_CONSTRAINT.to_string()));
        }
        tables.applications.push(application.clone());
        Ok(())
    }

    async fn count_applied_between(
        &self,
        professional_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let count = self
            .read()?
            .applications
            .iter()
            .filter(|a| a.professional_id == professional_id)
            .filter(|a| from <= a.applied_at && a.applied_at <= to)
            .count();
        Ok(count as i64)
    }

    async fn applicant_names(&self, service_id: Uuid) -> StoreResult<Vec<(String, Option<String>)>> {
        let tables = self.read()?;
        let names = tables
            .applications
            .iter()
            .filter(|a| {
                tables
                    .vacancies
                    .iter()
                    .any(|v| v.id == a.vacancy_id && v.service_id == service_id)
            })
            .filter_map(|a| {
                tables
                    .professionals
                    .iter()
                    .find(|p| p.id == a.professional_id)
                    .map(|p| (p.first_name.clone(), p.last_name.clone()))
            })
            .collect();
        Ok(names)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn prepare(&self) -> StoreResult<()> {
        Ok(())
    }
}
