#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use job_marketplace::{
    config::DEFAULT_MONTHLY_APPLICATION_LIMIT,
    database::MemoryStore,
    dto::{
        registry_dto::{RegisterEmployerPayload, RegisterProfessionalPayload},
        service_dto::CreateServicePayload,
        vacancy_dto::CreateVacancyPayload,
    },
    models::{
        employer::EmployerSummary, professional::ProfessionalView, service::Service,
        vacancy::VacancyView,
    },
    utils::time::Clock,
    AppState,
};

/// Clock the test moves by hand.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<TestClock>,
    pub state: AppState,
}

pub fn harness() -> Harness {
    harness_at(utc(2024, 5, 10, 9, 0, 0))
}

pub fn harness_at(now: DateTime<Utc>) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = TestClock::at(now);
    let state = AppState::new(store.clone(), clock.clone(), DEFAULT_MONTHLY_APPLICATION_LIMIT);
    Harness { store, clock, state }
}

impl Harness {
    pub async fn service(&self, name: &str) -> Service {
        self.state
            .catalog_service
            .create_service(CreateServicePayload { name: name.into() })
            .await
            .unwrap()
    }

    pub async fn organization(&self, name: &str) -> EmployerSummary {
        self.state
            .registry_service
            .register_employer(RegisterEmployerPayload {
                kind: Some("organization".into()),
                organization_name: Some(name.into()),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    pub async fn professional(
        &self,
        first_name: &str,
        last_name: Option<&str>,
        gender: Option<&str>,
        services: Vec<Uuid>,
    ) -> ProfessionalView {
        self.state
            .registry_service
            .register_professional(RegisterProfessionalPayload {
                first_name: first_name.into(),
                last_name: last_name.map(str::to_string),
                email: None,
                gender: gender.map(str::to_string),
                tax_id: format!("TAX-{}", Uuid::new_v4()),
                services,
            })
            .await
            .unwrap()
    }

    pub async fn vacancy(&self, title: &str, service_id: Uuid, employer_id: Uuid) -> VacancyView {
        self.state
            .vacancy_service
            .create(CreateVacancyPayload {
                title: title.into(),
                service_id,
                employer_id,
                location: Some("San Jose".into()),
            })
            .await
            .unwrap()
    }

    /// Service, employer and `n` vacancies for it.
    pub async fn vacancies(&self, n: usize) -> (Service, Vec<VacancyView>) {
        let service = self.service("IT").await;
        let employer = self.organization("ACME Inc.").await;
        let mut vacancies = Vec::with_capacity(n);
        for i in 0..n {
            vacancies.push(
                self.vacancy(&format!("Vacancy {}", i + 1), service.id, employer.id)
                    .await,
            );
        }
        (service, vacancies)
    }
}
