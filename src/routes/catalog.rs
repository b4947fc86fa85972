use axum::{extract::State, http::StatusCode, response::IntoResponse};

use super::extract::Json;
use crate::{dto::service_dto::CreateServicePayload, error::Result, AppState};

#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateServicePayload,
    responses(
        (status = 201, description = "Service created", body = crate::models::service::Service),
        (status = 400, description = "Blank name")
    )
)]
#[axum::debug_handler]
pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse> {
    let service = state.catalog_service.create_service(payload).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

#[utoipa::path(
    get,
    path = "/api/services",
    responses((status = 200, description = "All services", body = [crate::models::service::Service]))
)]
#[axum::debug_handler]
pub async fn list_services(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let services = state.catalog_service.list_services().await?;
    Ok(Json(services))
}
