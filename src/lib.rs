pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use crate::database::{postgres::PgVacancyStore, store::VacancyStore};
use crate::middleware::auth::AuthKeys;
use crate::services::vacancy_service::VacancyService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub vacancy_service: VacancyService,
    pub auth: AuthKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn VacancyStore>, auth: AuthKeys) -> Self {
        Self {
            vacancy_service: VacancyService::new(store),
            auth,
        }
    }

    pub fn with_pool(pool: PgPool, jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(PgVacancyStore::new(pool)),
            AuthKeys::from_secret(jwt_secret.as_bytes()),
        )
    }
}
