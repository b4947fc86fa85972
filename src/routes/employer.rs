use axum::{extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use super::extract::{Json, Path};
use crate::{
    dto::registry_dto::RegisterEmployerPayload,
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/employers",
    request_body = RegisterEmployerPayload,
    responses(
        (status = 201, description = "Employer registered", body = crate::models::employer::EmployerSummary),
        (status = 400, description = "Neither organization nor person name given")
    )
)]
#[axum::debug_handler]
pub async fn register_employer(
    State(state): State<AppState>,
    Json(payload): Json<RegisterEmployerPayload>,
) -> Result<impl IntoResponse> {
    let summary = state.registry_service.register_employer(payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

#[utoipa::path(
    get,
    path = "/api/employers/{id}/summary",
    params(("id" = Uuid, Path, description = "Employer ID")),
    responses(
        (status = 200, description = "Employer with current vacancy count", body = crate::models::employer::EmployerSummary),
        (status = 404, description = "Employer not found")
    )
)]
#[axum::debug_handler]
pub async fn employer_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let summary = state
        .registry_service
        .employer_summary(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("employer {} not found", id)))?;
    Ok(Json(summary))
}
