use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::vacancy::{NewVacancy, Vacancy, VacancyChanges};

/// Persistence boundary for vacancies.
///
/// Implementations stamp `id` and `created_at` on insert and return records
/// from `list` newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancyStore: Send + Sync {
    async fn insert(&self, vacancy: NewVacancy) -> Result<Vacancy>;

    async fn list(&self) -> Result<Vec<Vacancy>>;

    async fn find(&self, id: Uuid) -> Result<Option<Vacancy>>;

    /// Returns `None` when no row matched.
    async fn update(&self, id: Uuid, changes: VacancyChanges) -> Result<Option<Vacancy>>;

    /// Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
