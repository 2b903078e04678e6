//! Process-local vacancy store backing the router tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::store::VacancyStore;
use crate::error::Result;
use crate::models::vacancy::{NewVacancy, Vacancy, VacancyChanges};

#[derive(Default)]
struct Inner {
    // insertion order, which is also created_at order
    rows: Vec<Vacancy>,
    last_stamp: Option<DateTime<Utc>>,
}

#[derive(Default)]
pub struct MemoryVacancyStore {
    inner: RwLock<Inner>,
}

impl MemoryVacancyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    /// Creation stamps strictly increase so newest-first ordering has no ties.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

#[async_trait]
impl VacancyStore for MemoryVacancyStore {
    async fn insert(&self, vacancy: NewVacancy) -> Result<Vacancy> {
        let mut inner = self.inner.write().await;
        let created_at = inner.next_stamp();
        let row = Vacancy {
            id: Uuid::new_v4(),
            employer: vacancy.employer,
            title: vacancy.title,
            location: vacancy.location,
            job_type: vacancy.job_type,
            description: vacancy.description,
            created_at,
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Vacancy>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().rev().cloned().collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Vacancy>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().find(|v| v.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: VacancyChanges) -> Result<Option<Vacancy>> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };
        changes.apply_to(row);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.rows.len();
        inner.rows.retain(|v| v.id != id);
        Ok(inner.rows.len() < before)
    }
}
