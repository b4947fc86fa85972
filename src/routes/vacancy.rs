use axum::{extract::State, http::StatusCode, response::IntoResponse};

use super::extract::Json;
use crate::{dto::vacancy_dto::CreateVacancyPayload, error::Result, AppState};

#[utoipa::path(
    post,
    path = "/api/vacancies",
    request_body = CreateVacancyPayload,
    responses(
        (status = 201, description = "Vacancy created", body = crate::models::vacancy::VacancyView),
        (status = 400, description = "Blank title"),
        (status = 404, description = "Service or employer not found")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Json(payload): Json<CreateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies",
    responses((status = 200, description = "Vacancies, newest first", body = [crate::models::vacancy::VacancyView]))
)]
#[axum::debug_handler]
pub async fn list_vacancies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let vacancies = state.vacancy_service.list().await?;
    Ok(Json(vacancies))
}
