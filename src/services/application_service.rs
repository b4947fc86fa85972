//! Monthly quota and duplicate rules for applications.
//!
//! The quota is a read followed by a write, not one transaction: two
//! concurrent calls for the same professional can both pass the count and
//! both insert. Only the (professional, vacancy) pair is atomic, and that
//! guarantee belongs to the store's uniqueness constraint.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::DEFAULT_MONTHLY_APPLICATION_LIMIT;
use crate::database::store::{ApplicationStore, ProfessionalStore, StoreError, VacancyStore};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::utils::time::{Clock, MonthWindow};

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationStore>,
    professionals: Arc<dyn ProfessionalStore>,
    vacancies: Arc<dyn VacancyStore>,
    clock: Arc<dyn Clock>,
    monthly_limit: usize,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        professionals: Arc<dyn ProfessionalStore>,
        vacancies: Arc<dyn VacancyStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            applications,
            professionals,
            vacancies,
            clock,
            monthly_limit: DEFAULT_MONTHLY_APPLICATION_LIMIT,
        }
    }

    pub fn with_monthly_limit(mut self, limit: usize) -> Self {
        self.monthly_limit = limit;
        self
    }

    pub async fn apply(&self, professional_id: Uuid, vacancy_id: Uuid) -> Result<bool> {
        let (professional, vacancy) = tokio::try_join!(
            self.professionals.find_professional(professional_id),
            self.vacancies.find_vacancy(vacancy_id),
        )?;
        if professional.is_none() {
            return Err(Error::NotFound(format!("professional {} not found", professional_id)));
        }
        if vacancy.is_none() {
            return Err(Error::NotFound(format!("vacancy {} not found", vacancy_id)));
        }

        let now = self.clock.now();
        let window = MonthWindow::containing(now);

        let applied = self
            .applications
            .count_applied_between(professional_id, window.start, window.end)
            .await?;
        if applied >= self.monthly_limit as i64 {
            tracing::warn!(
                %professional_id,
                %vacancy_id,
                applied,
                limit = self.monthly_limit,
                "Monthly application limit reached"
            );
            return Err(Error::QuotaExceeded {
                limit: self.monthly_limit,
            });
        }

        let application = Application {
            id: Uuid::new_v4(),
            professional_id,
            vacancy_id,
            applied_at: now,
        };
        match self.applications.insert_application(&application).await {
            Ok(()) => {}
            Err(StoreError::Conflict(constraint)) => {
                tracing::warn!(%professional_id, %vacancy_id, %constraint, "Duplicate application rejected");
                return Err(Error::DuplicateApplication);
            }
            Err(other) => return Err(other.into()),
        }

        tracing::info!(
            application_id = %application.id,
            %professional_id,
            %vacancy_id,
            "Application recorded"
        );
        Ok(true)
    }
}
