use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
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

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct EmployerRow {
    id: Uuid,
    kind: String,
    organization_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    tax_id: Option<String>,
}

impl From<EmployerRow> for Employer {
    fn from(row: EmployerRow) -> Self {
        Self {
            id: row.id,
            kind: row.kind.parse().unwrap_or_default(),
            organization_name: row.organization_name,
            first_name: row.first_name,
            last_name: row.last_name,
            tax_id: row.tax_id,
        }
    }
}

#[derive(FromRow)]
struct ProfessionalRow {
    id: Uuid,
    first_name: String,
    last_name: Option<String>,
    email: Option<String>,
    gender: Option<String>,
    tax_id: Option<String>,
    services: Vec<Uuid>,
    education: Json<Vec<Education>>,
    work_experience: Json<Vec<WorkExperience>>,
}

impl From<ProfessionalRow> for Professional {
    fn from(row: ProfessionalRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            gender: row.gender,
            tax_id: row.tax_id,
            services: row.services,
            education: row.education.0,
            work_experience: row.work_experience.0,
        }
    }
}

const EMPLOYER_COLUMNS: &str = "id, kind, organization_name, first_name, last_name, tax_id";
const PROFESSIONAL_COLUMNS: &str =
    "id, first_name, last_name, email, gender, tax_id, services, education, work_experience";
const VACANCY_COLUMNS: &str = "id, title, service_id, employer_id, location, created_at";

#[async_trait]
impl ServiceStore for PgStore {
    async fn insert_service(&self, service: &Service) -> StoreResult<()> {
        sqlx::query("INSERT INTO services (id, name) VALUES ($1, $2)")
            .bind(service.id)
            .bind(&service.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_service(&self, id: Uuid) -> StoreResult<Option<Service>> {
        let service = sqlx::query_as::<_, Service>("SELECT id, name FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(service)
    }

    async fn find_services(&self, ids: &[Uuid]) -> StoreResult<Vec<Service>> {
        let services =
            sqlx::query_as::<_, Service>("SELECT id, name FROM services WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;
        Ok(services)
    }

    async fn list_services(&self) -> StoreResult<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>("SELECT id, name FROM services")
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }
}

#[async_trait]
impl EmployerStore for PgStore {
    async fn insert_employer(&self, employer: &Employer) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employers (id, kind, organization_name, first_name, last_name, tax_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(employer.id)
        .bind(employer.kind.as_str())
        .bind(&employer.organization_name)
        .bind(&employer.first_name)
        .bind(&employer.last_name)
        .bind(&employer.tax_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_employer(&self, id: Uuid) -> StoreResult<Option<Employer>> {
        let query = format!("SELECT {} FROM employers WHERE id = $1", EMPLOYER_COLUMNS);
        let row = sqlx::query_as::<_, EmployerRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Employer::from))
    }

    async fn find_employers(&self, ids: &[Uuid]) -> StoreResult<Vec<Employer>> {
        let query = format!("SELECT {} FROM employers WHERE id = ANY($1)", EMPLOYER_COLUMNS);
        let rows = sqlx::query_as::<_, EmployerRow>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Employer::from).collect())
    }
}

#[async_trait]
impl ProfessionalStore for PgStore {
    async fn insert_professional(&self, professional: &Professional) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO professionals
                (id, first_name, last_name, email, gender, tax_id, services, education, work_experience)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(professional.id)
        .bind(&professional.first_name)
        .bind(&professional.last_name)
        .bind(&professional.email)
        .bind(&professional.gender)
        .bind(&professional.tax_id)
        .bind(&professional.services)
        .bind(Json(&professional.education))
        .bind(Json(&professional.work_experience))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_professional(&self, id: Uuid) -> StoreResult<Option<Professional>> {
        let query = format!("SELECT {} FROM professionals WHERE id = $1", PROFESSIONAL_COLUMNS);
        let row = sqlx::query_as::<_, ProfessionalRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Professional::from))
    }

    async fn list_professionals(&self) -> StoreResult<Vec<Professional>> {
        let query = format!("SELECT {} FROM professionals", PROFESSIONAL_COLUMNS);
        let rows = sqlx::query_as::<_, ProfessionalRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Professional::from).collect())
    }

    async fn set_services(&self, id: Uuid, service_ids: &[Uuid]) -> StoreResult<u64> {
        let res = sqlx::query("UPDATE professionals SET services = $2 WHERE id = $1")
            .bind(id)
            .bind(service_ids)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn push_education(&self, id: Uuid, record: &Education) -> StoreResult<u64> {
        let res = sqlx::query("UPDATE professionals SET education = education || $2 WHERE id = $1")
            .bind(id)
            .bind(Json(vec![record]))
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn push_work_experience(&self, id: Uuid, record: &WorkExperience) -> StoreResult<u64> {
        let res = sqlx::query(
            "UPDATE professionals SET work_experience = work_experience || $2 WHERE id = $1",
        )
        .bind(id)
        .bind(Json(vec![record]))
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    async fn count_by_service(&self) -> StoreResult<Vec<(Uuid, i64)>> {
        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT service_id, COUNT(*)
            FROM professionals, UNNEST(services) AS service_id
            GROUP BY service_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_by_gender(&self) -> StoreResult<Vec<(Option<String>, i64)>> {
        let rows = sqlx::query_as::<_, (Option<String>, i64)>(
            "SELECT gender, COUNT(*) FROM professionals GROUP BY gender",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl VacancyStore for PgStore {
    async fn insert_vacancy(&self, vacancy: &Vacancy) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vacancies (id, title, service_id, employer_id, location, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(vacancy.id)
        .bind(&vacancy.title)
        .bind(vacancy.service_id)
        .bind(vacancy.employer_id)
        .bind(&vacancy.location)
        .bind(vacancy.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_vacancy(&self, id: Uuid) -> StoreResult<Option<Vacancy>> {
        let query = format!("SELECT {} FROM vacancies WHERE id = $1", VACANCY_COLUMNS);
        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vacancy)
    }

    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>> {
        let query = format!("SELECT {} FROM vacancies ORDER BY created_at DESC", VACANCY_COLUMNS);
        let vacancies = sqlx::query_as::<_, Vacancy>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(vacancies)
    }

    async fn count_by_employer(&self, employer_id: Uuid) -> StoreResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vacancies WHERE employer_id = $1")
                .bind(employer_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn insert_application(&self, application: &Application) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO applications (id, professional_id, vacancy_id, applied_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(application.id)
        .bind(application.professional_id)
        .bind(application.vacancy_id)
        .bind(application.applied_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                let constraint = db_err
                    .constraint()
                    .unwrap_or(APPLICATION_UNIQUE_CONSTRAINT)
                    .to_string();
                Err(StoreError::Conflict(constraint))
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn count_applied_between(
        &self,
        professional_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM applications
            WHERE professional_id = $1 AND applied_at >= $2 AND applied_at <= $3
            "#,
        )
        .bind(professional_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn applicant_names(&self, service_id: Uuid) -> StoreResult<Vec<(String, Option<String>)>> {
        let rows = sqlx::query_as::<_, (String, Option<String>)>(
            r#"
            SELECT p.first_name, p.last_name
            FROM applications a
            JOIN vacancies v ON v.id = a.vacancy_id
            JOIN professionals p ON p.id = a.professional_id
            WHERE v.service_id = $1
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn prepare(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database schema and constraints ensured");
        Ok(())
    }
}
