use axum::{extract::State, response::IntoResponse};
use uuid::Uuid;

use super::extract::{Json, Path};
use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/reports/services/{id}/applicants",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Distinct applicants to the service's vacancies", body = crate::models::report::ApplicantsByService),
        (status = 404, description = "Service not found")
    )
)]
#[axum::debug_handler]
pub async fn applicants_by_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let report = state.report_service.applicants_by_service(id).await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/reports/professionals-by-service",
    responses((status = 200, description = "Professionals per service", body = [crate::models::report::ServiceStat]))
)]
#[axum::debug_handler]
pub async fn professionals_by_service(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.report_service.professionals_by_service_stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/reports/professionals-by-gender",
    responses((status = 200, description = "Professionals per gender", body = [crate::models::report::GenderStat]))
)]
#[axum::debug_handler]
pub async fn professionals_by_gender(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.report_service.professionals_by_gender().await?;
    Ok(Json(stats))
}
