use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::VacancyStore;
use crate::error::Result;
use crate::models::vacancy::{NewVacancy, Vacancy, VacancyChanges};

const COLUMNS: &str = "id, employer_id, title, location, job_type, description, created_at";

#[derive(Clone)]
pub struct PgVacancyStore {
    pool: PgPool,
}

impl PgVacancyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacancyStore for PgVacancyStore {
    async fn insert(&self, vacancy: NewVacancy) -> Result<Vacancy> {
        let query = format!(
            "INSERT INTO vacancies (employer_id, title, location, job_type, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            COLUMNS
        );
        let created = sqlx::query_as::<_, Vacancy>(&query)
            .bind(vacancy.employer)
            .bind(vacancy.title)
            .bind(vacancy.location)
            .bind(vacancy.job_type.as_str())
            .bind(vacancy.description)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Vacancy>> {
        let query = format!(
            "SELECT {} FROM vacancies ORDER BY created_at DESC, id DESC",
            COLUMNS
        );
        let items = sqlx::query_as::<_, Vacancy>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Vacancy>> {
        let query = format!("SELECT {} FROM vacancies WHERE id = $1", COLUMNS);
        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vacancy)
    }

    async fn update(&self, id: Uuid, changes: VacancyChanges) -> Result<Option<Vacancy>> {
        let query = format!(
            "UPDATE vacancies
             SET
                title = COALESCE($2, title),
                location = COALESCE($3, location),
                job_type = COALESCE($4, job_type),
                description = COALESCE($5, description)
             WHERE id = $1
             RETURNING {}",
            COLUMNS
        );
        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .bind(changes.title)
            .bind(changes.location)
            .bind(changes.job_type.map(|jt| jt.as_str()))
            .bind(changes.description)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vacancy)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
