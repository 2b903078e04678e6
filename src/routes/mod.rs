pub mod health;
pub mod vacancy;

use axum::{
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, MethodRouter},
    Router,
};
use utoipa::OpenApi;

use crate::{
    dto::vacancy_dto::{VacancyPayload, VacancyResponse},
    middleware::auth::require_bearer_auth,
    models::vacancy::JobType,
    AppState,
};

/// Operations exposed on the vacancy collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    AllowAny,
    IsAuthenticated,
}

impl Action {
    pub fn permission(self) -> Permission {
        match self {
            Action::List | Action::Retrieve => Permission::AllowAny,
            Action::Create | Action::Update | Action::PartialUpdate | Action::Destroy => {
                Permission::IsAuthenticated
            }
        }
    }
}

/// Wraps a handler in the guard its action requires.
fn guarded(
    state: &AppState,
    action: Action,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    match action.permission() {
        Permission::AllowAny => route,
        Permission::IsAuthenticated => {
            route.route_layer(from_fn_with_state(state.auth.clone(), require_bearer_auth))
        }
    }
}

/// The `/vacancies/` resource with every route bound explicitly.
pub fn vacancy_routes(state: &AppState) -> Router<AppState> {
    use axum::routing::{delete, patch, post, put};

    let collection = guarded(state, Action::List, get(vacancy::list_vacancies)).merge(guarded(
        state,
        Action::Create,
        post(vacancy::create_vacancy),
    ));

    let item = guarded(state, Action::Retrieve, get(vacancy::get_vacancy))
        .merge(guarded(
            state,
            Action::Update,
            put(vacancy::update_vacancy),
        ))
        .merge(guarded(
            state,
            Action::PartialUpdate,
            patch(vacancy::partial_update_vacancy),
        ))
        .merge(guarded(
            state,
            Action::Destroy,
            delete(vacancy::delete_vacancy),
        ));

    Router::new()
        .route("/vacancies/", collection)
        .route("/vacancies/:id/", item)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        vacancy::list_vacancies,
        vacancy::get_vacancy,
        vacancy::create_vacancy,
        vacancy::update_vacancy,
        vacancy::partial_update_vacancy,
        vacancy::delete_vacancy,
    ),
    components(schemas(VacancyPayload, VacancyResponse, JobType))
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Vacancy resource plus its OpenAPI document, ready to serve or nest.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/openapi.json", get(openapi))
        .merge(vacancy_routes(&state))
        .with_state(state)
}
