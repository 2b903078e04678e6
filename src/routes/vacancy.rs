use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::vacancy_dto::{VacancyPayload, VacancyResponse, WriteMode},
    error::{Error, Result},
    middleware::auth::AuthUser,
    AppState,
};

/// Any path segment that is not a UUID cannot name a stored vacancy.
fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound(format!("Vacancy {} not found", raw)))
}

#[utoipa::path(
    get,
    path = "/vacancies/",
    responses(
        (status = 200, description = "All vacancies, newest first", body = [VacancyResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_vacancies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.vacancy_service.list().await?;
    let body: Vec<VacancyResponse> = items.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/vacancies/{id}/",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy found", body = VacancyResponse),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.get_by_id(parse_id(&id)?).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    post,
    path = "/vacancies/",
    request_body = VacancyPayload,
    responses(
        (status = 201, description = "Vacancy created", body = VacancyResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Authentication required")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<VacancyPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let vacancy = state.vacancy_service.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

async fn write_vacancy(
    state: AppState,
    user: AuthUser,
    id: String,
    payload: std::result::Result<Json<VacancyPayload>, JsonRejection>,
    mode: WriteMode,
) -> Result<Json<VacancyResponse>> {
    let id = parse_id(&id)?;
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            // an absent record is reported before a malformed body
            state.vacancy_service.get_by_id(id).await?;
            return Err(rejection.into());
        }
    };
    let vacancy = state
        .vacancy_service
        .update(user.id, id, payload, mode)
        .await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    put,
    path = "/vacancies/{id}/",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = VacancyPayload,
    responses(
        (status = 200, description = "Vacancy replaced", body = VacancyResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<VacancyPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    write_vacancy(state, user, id, payload, WriteMode::Full).await
}

#[utoipa::path(
    patch,
    path = "/vacancies/{id}/",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = VacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated", body = VacancyResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn partial_update_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<VacancyPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    write_vacancy(state, user, id, payload, WriteMode::Partial).await
}

#[utoipa::path(
    delete,
    path = "/vacancies/{id}/",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 204, description = "Vacancy deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.vacancy_service.delete(user.id, parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
