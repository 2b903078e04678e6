use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::store::VacancyStore;
use crate::dto::vacancy_dto::{VacancyPayload, WriteMode};
use crate::error::{Error, Result};
use crate::models::vacancy::Vacancy;

#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn VacancyStore>,
}

fn not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Vacancy {} not found", id))
}

impl VacancyService {
    pub fn new(store: Arc<dyn VacancyStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Vacancy>> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vacancy> {
        self.store.find(id).await?.ok_or_else(|| not_found(id))
    }

    /// Creates a vacancy owned by `employer`. Whatever the payload says about
    /// ownership or timestamps never reaches the store.
    pub async fn create(&self, employer: Uuid, payload: VacancyPayload) -> Result<Vacancy> {
        let new = payload.into_new_vacancy(employer)?;
        let vacancy = self.store.insert(new).await?;
        info!(vacancy_id = %vacancy.id, employer = %employer, "vacancy created");
        Ok(vacancy)
    }

    /// Applies an update from any authenticated caller. Ownership is not
    /// checked: the acting user only ends up in the log.
    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        payload: VacancyPayload,
        mode: WriteMode,
    ) -> Result<Vacancy> {
        self.get_by_id(id).await?;
        let changes = payload.into_changes(mode)?;
        let vacancy = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(vacancy_id = %id, actor = %actor, ?mode, "vacancy updated");
        Ok(vacancy)
    }

    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        info!(vacancy_id = %id, actor = %actor, "vacancy deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::MockVacancyStore;
    use crate::models::vacancy::JobType;
    use chrono::Utc;
    use serde_json::json;

    fn stored(id: Uuid, employer: Uuid) -> Vacancy {
        Vacancy {
            id,
            employer,
            title: "Baker".into(),
            location: "Springfield".into(),
            job_type: JobType::FullTime,
            description: "Bake bread".into(),
            created_at: Utc::now(),
        }
    }

    fn payload(value: serde_json::Value) -> VacancyPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn create_binds_employer_from_caller() {
        let caller = Uuid::new_v4();
        let mut store = MockVacancyStore::new();
        store
            .expect_insert()
            .withf(move |new| new.employer == caller)
            .times(1)
            .returning(|new| Ok(stored(Uuid::new_v4(), new.employer)));

        let service = VacancyService::new(Arc::new(store));
        let created = service
            .create(
                caller,
                payload(json!({
                    "employer": Uuid::new_v4(),
                    "title": "Baker",
                    "location": "Springfield",
                    "job_type": "Full-time",
                    "description": "Bake bread"
                })),
            )
            .await
            .unwrap();

        assert_eq!(created.employer, caller);
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_store() {
        let mut store = MockVacancyStore::new();
        store.expect_insert().never();

        let service = VacancyService::new(Arc::new(store));
        let err = service
            .create(Uuid::new_v4(), payload(json!({ "job_type": "Gig" })))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn update_of_missing_vacancy_is_not_found_before_validation() {
        let mut store = MockVacancyStore::new();
        store.expect_find().returning(|_| Ok(None));
        store.expect_update().never();

        let service = VacancyService::new(Arc::new(store));
        let err = service
            .update(
                Uuid::new_v4(),
                Uuid::new_v4(),
                payload(json!({ "job_type": "Gig" })),
                WriteMode::Partial,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn update_by_other_user_is_allowed() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let id = Uuid::new_v4();
        let mut store = MockVacancyStore::new();
        store
            .expect_find()
            .returning(move |id| Ok(Some(stored(id, owner))));
        store.expect_update().returning(move |id, changes| {
            let mut row = stored(id, owner);
            changes.apply_to(&mut row);
            Ok(Some(row))
        });

        let service = VacancyService::new(Arc::new(store));
        let updated = service
            .update(
                other,
                id,
                payload(json!({ "title": "Head Baker" })),
                WriteMode::Partial,
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Head Baker");
        assert_eq!(updated.employer, owner);
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut store = MockVacancyStore::new();
        store
            .expect_delete()
            .returning(|_| Err(Error::Database(sqlx::Error::PoolTimedOut)));

        let service = VacancyService::new(Arc::new(store));
        let err = service
            .delete(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn delete_of_missing_vacancy_is_not_found() {
        let mut store = MockVacancyStore::new();
        store.expect_delete().returning(|_| Ok(false));

        let service = VacancyService::new(Arc::new(store));
        let err = service
            .delete(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
    }
}
