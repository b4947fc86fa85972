pub mod application;
pub mod catalog;
pub mod employer;
pub mod extract;
pub mod health;
pub mod professional;
pub mod report;
pub mod vacancy;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        catalog::create_service,
        catalog::list_services,
        employer::register_employer,
        employer::employer_summary,
        professional::register_professional,
        professional::list_professionals,
        professional::get_professional,
        professional::assign_services,
        professional::add_education,
        professional::add_work_experience,
        vacancy::create_vacancy,
        vacancy::list_vacancies,
        application::apply_to_vacancy,
        report::applicants_by_service,
        report::professionals_by_service,
        report::professionals_by_gender,
    ),
    components(schemas(
        crate::models::service::Service,
        crate::models::employer::EmployerKind,
        crate::models::employer::EmployerSummary,
        crate::models::professional::Education,
        crate::models::professional::WorkExperience,
        crate::models::professional::ProfessionalView,
        crate::models::vacancy::VacancyView,
        crate::models::report::ApplicantsByService,
        crate::models::report::ServiceStat,
        crate::models::report::GenderStat,
        crate::dto::service_dto::CreateServicePayload,
        crate::dto::registry_dto::RegisterEmployerPayload,
        crate::dto::registry_dto::RegisterProfessionalPayload,
        crate::dto::registry_dto::AssignServicesPayload,
        crate::dto::registry_dto::AssignServicesResponse,
        crate::dto::vacancy_dto::CreateVacancyPayload,
        crate::dto::application_dto::ApplyPayload,
        crate::dto::application_dto::ApplyResponse,
    ))
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route(
            "/api/services",
            get(catalog::list_services).post(catalog::create_service),
        )
        .route("/api/employers", post(employer::register_employer))
        .route("/api/employers/:id/summary", get(employer::employer_summary))
        .route(
            "/api/professionals",
            get(professional::list_professionals).post(professional::register_professional),
        )
        .route("/api/professionals/:id", get(professional::get_professional))
        .route(
            "/api/professionals/:id/services",
            put(professional::assign_services),
        )
        .route(
            "/api/professionals/:id/education",
            post(professional::add_education),
        )
        .route(
            "/api/professionals/:id/work-experience",
            post(professional::add_work_experience),
        )
        .route(
            "/api/vacancies",
            get(vacancy::list_vacancies).post(vacancy::create_vacancy),
        )
        .route("/api/applications", post(application::apply_to_vacancy))
        .route(
            "/api/reports/services/:id/applicants",
            get(report::applicants_by_service),
        )
        .route(
            "/api/reports/professionals-by-service",
            get(report::professionals_by_service),
        )
        .route(
            "/api/reports/professionals-by-gender",
            get(report::professionals_by_gender),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
