use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::{ApplicationStore, ProfessionalStore, ServiceStore};
use crate::error::{Error, Result};
use crate::models::{
    professional::full_name,
    report::{ApplicantsByService, GenderStat, ServiceStat},
};

/// Label for professionals that did not state a gender.
pub const GENDER_NOT_SPECIFIED: &str = "Not specified";

/// Read-only statistics across the entity graph. Grouping runs in the store;
/// labels, rounding and ordering are applied here so every backend agrees.
#[derive(Clone)]
pub struct ReportService {
    services: Arc<dyn ServiceStore>,
    professionals: Arc<dyn ProfessionalStore>,
    applications: Arc<dyn ApplicationStore>,
}

impl ReportService {
    pub fn new(
        services: Arc<dyn ServiceStore>,
        professionals: Arc<dyn ProfessionalStore>,
        applications: Arc<dyn ApplicationStore>,
    ) -> Self {
        Self {
            services,
            professionals,
            applications,
        }
    }

    pub async fn applicants_by_service(&self, service_id: Uuid) -> Result<ApplicantsByService> {
        let (service, names) = tokio::try_join!(
            self.services.find_service(service_id),
            self.applications.applicant_names(service_id),
        )?;
        let service =
            service.ok_or_else(|| Error::NotFound(format!("service {} not found", service_id)))?;

        let applicants: BTreeSet<String> = names
            .iter()
            .map(|(first, last)| full_name(first, last.as_deref()))
            .filter(|name| !name.is_empty())
            .collect();

        Ok(ApplicantsByService {
            service_name: service.name,
            applicants: applicants.into_iter().collect(),
        })
    }

    pub async fn professionals_by_service_stats(&self) -> Result<Vec<ServiceStat>> {
        let counts = self.professionals.count_by_service().await?;
        let ids: Vec<Uuid> = counts.iter().map(|(id, _)| *id).collect();
        let names: HashMap<Uuid, String> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.services
                .find_services(&ids)
                .await?
                .into_iter()
                .map(|s| (s.id, s.name))
                .collect()
        };

        // Dangling references are dropped before totalling.
        let rows: Vec<(String, i64)> = counts
            .into_iter()
            .filter_map(|(id, count)| names.get(&id).map(|name| (name.clone(), count)))
            .collect();
        Ok(service_stats(rows))
    }

    pub async fn professionals_by_gender(&self) -> Result<Vec<GenderStat>> {
        let counts = self.professionals.count_by_gender().await?;
        Ok(gender_stats(counts))
    }
}

fn service_stats(rows: Vec<(String, i64)>) -> Vec<ServiceStat> {
    let total: i64 = rows.iter().map(|(_, count)| count).sum();
    let mut stats: Vec<ServiceStat> = rows
        .into_iter()
        .map(|(service_name, count)| ServiceStat {
            percentage: percentage(count, total),
            service_name,
            count,
        })
        .collect();
    stats.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.service_name.cmp(&b.service_name))
    });
    stats
}

fn gender_stats(counts: Vec<(Option<String>, i64)>) -> Vec<GenderStat> {
    // Blank and missing genders share the sentinel bucket.
    let mut merged: HashMap<String, i64> = HashMap::new();
    for (gender, count) in counts {
        let label = gender
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| GENDER_NOT_SPECIFIED.to_string());
        *merged.entry(label).or_default() += count;
    }

    let mut stats: Vec<GenderStat> = merged
        .into_iter()
        .map(|(gender, count)| GenderStat { gender, count })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.gender.cmp(&b.gender)));
    stats
}

/// `count / total * 100`, rounded half-to-even at two decimals.
fn percentage(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round_ties_even() / 100.0
}
