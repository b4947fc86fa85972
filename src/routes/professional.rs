use axum::{extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use super::extract::{Json, Path};
use crate::{
    dto::registry_dto::{AssignServicesPayload, AssignServicesResponse, RegisterProfessionalPayload},
    error::{Error, Result},
    models::professional::{Education, WorkExperience},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/professionals",
    request_body = RegisterProfessionalPayload,
    responses(
        (status = 201, description = "Professional registered", body = crate::models::professional::ProfessionalView),
        (status = 400, description = "Missing first name or tax id")
    )
)]
#[axum::debug_handler]
pub async fn register_professional(
    State(state): State<AppState>,
    Json(payload): Json<RegisterProfessionalPayload>,
) -> Result<impl IntoResponse> {
    let professional = state.registry_service.register_professional(payload).await?;
    Ok((StatusCode::CREATED, Json(professional)))
}

#[utoipa::path(
    get,
    path = "/api/professionals",
    responses((status = 200, description = "All professionals", body = [crate::models::professional::ProfessionalView]))
)]
#[axum::debug_handler]
pub async fn list_professionals(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let professionals = state.registry_service.list_professionals().await?;
    Ok(Json(professionals))
}

#[utoipa::path(
    get,
    path = "/api/professionals/{id}",
    params(("id" = Uuid, Path, description = "Professional ID")),
    responses(
        (status = 200, description = "Professional", body = crate::models::professional::ProfessionalView),
        (status = 404, description = "Professional not found")
    )
)]
#[axum::debug_handler]
pub async fn get_professional(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let professional = state
        .registry_service
        .get_professional(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("professional {} not found", id)))?;
    Ok(Json(professional))
}

#[utoipa::path(
    put,
    path = "/api/professionals/{id}/services",
    params(("id" = Uuid, Path, description = "Professional ID")),
    request_body = AssignServicesPayload,
    responses(
        (status = 200, description = "Service set replaced", body = AssignServicesResponse),
        (status = 404, description = "Professional not found")
    )
)]
#[axum::debug_handler]
pub async fn assign_services(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignServicesPayload>,
) -> Result<impl IntoResponse> {
    let assigned = state
        .registry_service
        .assign_services(id, payload.service_ids)
        .await?;
    Ok(Json(AssignServicesResponse { assigned }))
}

#[utoipa::path(
    post,
    path = "/api/professionals/{id}/education",
    params(("id" = Uuid, Path, description = "Professional ID")),
    request_body = Education,
    responses(
        (status = 200, description = "Education appended", body = crate::models::professional::ProfessionalView),
        (status = 404, description = "Professional not found")
    )
)]
#[axum::debug_handler]
pub async fn add_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(record): Json<Education>,
) -> Result<impl IntoResponse> {
    let professional = state.registry_service.add_education(id, record).await?;
    Ok(Json(professional))
}

#[utoipa::path(
    post,
    path = "/api/professionals/{id}/work-experience",
    params(("id" = Uuid, Path, description = "Professional ID")),
    request_body = WorkExperience,
    responses(
        (status = 200, description = "Work experience appended", body = crate::models::professional::ProfessionalView),
        (status = 404, description = "Professional not found")
    )
)]
#[axum::debug_handler]
pub async fn add_work_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(record): Json<WorkExperience>,
) -> Result<impl IntoResponse> {
    let professional = state.registry_service.add_work_experience(id, record).await?;
    Ok(Json(professional))
}
