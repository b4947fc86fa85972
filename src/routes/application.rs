use axum::{extract::State, http::StatusCode, response::IntoResponse};

use super::extract::Json;
use crate::{
    dto::application_dto::{ApplyPayload, ApplyResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application recorded", body = ApplyResponse),
        (status = 404, description = "Professional or vacancy not found"),
        (status = 409, description = "Already applied to this vacancy"),
        (status = 422, description = "Monthly application limit reached")
    )
)]
#[axum::debug_handler]
pub async fn apply_to_vacancy(
    State(state): State<AppState>,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    let applied = state
        .application_service
        .apply(payload.professional_id, payload.vacancy_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApplyResponse { applied })))
}
