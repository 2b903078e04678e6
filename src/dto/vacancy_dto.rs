use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::vacancy::{JobType, NewVacancy, Vacancy, VacancyChanges};

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";
const NULL: &str = "This field may not be null.";

/// How strictly a payload is checked before it reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create and PUT: every writable field must be present.
    Full,
    /// PATCH: absent fields keep their stored value.
    Partial,
}

/// `None` when the key is absent, `Some(None)` for an explicit `null`.
pub type Field = Option<Option<String>>;

fn present<'de, D>(deserializer: D) -> Result<Field, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Inbound vacancy body. Only these four keys are read; anything else the
/// client sends (`id`, `employer`, `created_at`, ...) is dropped by serde.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct VacancyPayload {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    #[validate(length(
        max = 100,
        message = "Ensure this field has no more than 100 characters."
    ))]
    pub title: Field,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    #[validate(length(
        max = 100,
        message = "Ensure this field has no more than 100 characters."
    ))]
    pub location: Field,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Full-time")]
    pub job_type: Field,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Field,
}

fn field_error(code: &'static str, message: impl Into<String>) -> ValidationError {
    let message: String = message.into();
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn trimmed(value: Field) -> Field {
    value.map(|v| v.map(|s| s.trim().to_string()))
}

impl VacancyPayload {
    /// Trims free-text fields. `job_type` is a choice and is matched as sent.
    fn normalized(self) -> Self {
        Self {
            title: trimmed(self.title),
            location: trimmed(self.location),
            job_type: self.job_type,
            description: trimmed(self.description),
        }
    }

    fn check(&self, mode: WriteMode) -> Result<Option<JobType>, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let text_fields: [(&'static str, &Field); 3] = [
            ("title", &self.title),
            ("location", &self.location),
            ("description", &self.description),
        ];
        for (name, value) in text_fields {
            match value {
                None if mode == WriteMode::Full => {
                    errors.add(name, field_error("required", REQUIRED))
                }
                Some(None) => errors.add(name, field_error("null", NULL)),
                Some(Some(v)) if v.is_empty() => errors.add(name, field_error("blank", BLANK)),
                _ => {}
            }
        }

        let mut job_type = None;
        match &self.job_type {
            None if mode == WriteMode::Full => {
                errors.add("job_type", field_error("required", REQUIRED))
            }
            None => {}
            Some(None) => errors.add("job_type", field_error("null", NULL)),
            Some(Some(raw)) => match raw.parse::<JobType>() {
                Ok(parsed) => job_type = Some(parsed),
                Err(e) => errors.add("job_type", field_error("invalid_choice", e.to_string())),
            },
        }

        if errors.errors().is_empty() {
            Ok(job_type)
        } else {
            Err(errors)
        }
    }

    /// Validates in full mode and binds the record to `employer`.
    pub fn into_new_vacancy(self, employer: Uuid) -> Result<NewVacancy, ValidationErrors> {
        let payload = self.normalized();
        let job_type = payload.check(WriteMode::Full)?;
        match (
            payload.title.flatten(),
            payload.location.flatten(),
            job_type,
            payload.description.flatten(),
        ) {
            (Some(title), Some(location), Some(job_type), Some(description)) => Ok(NewVacancy {
                employer,
                title,
                location,
                job_type,
                description,
            }),
            // check() reports every missing field in full mode
            _ => Err(ValidationErrors::new()),
        }
    }

    pub fn into_changes(self, mode: WriteMode) -> Result<VacancyChanges, ValidationErrors> {
        let payload = self.normalized();
        let job_type = payload.check(mode)?;
        Ok(VacancyChanges {
            title: payload.title.flatten(),
            location: payload.location.flatten(),
            job_type,
            description: payload.description.flatten(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub employer: Uuid,
    pub title: String,
    pub location: String,
    pub job_type: JobType,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Vacancy> for VacancyResponse {
    fn from(value: Vacancy) -> Self {
        Self {
            id: value.id,
            employer: value.employer,
            title: value.title,
            location: value.location,
            job_type: value.job_type,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::field_messages;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> VacancyPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn full_mode_builds_new_vacancy() {
        let employer = Uuid::new_v4();
        let new = payload(json!({
            "title": "  Baker ",
            "location": "Springfield",
            "job_type": "Full-time",
            "description": "Bake bread"
        }))
        .into_new_vacancy(employer)
        .unwrap();

        assert_eq!(new.employer, employer);
        assert_eq!(new.title, "Baker");
        assert_eq!(new.job_type, JobType::FullTime);
    }

    #[test]
    fn read_only_keys_are_ignored() {
        let employer = Uuid::new_v4();
        let new = payload(json!({
            "id": Uuid::new_v4(),
            "employer": Uuid::new_v4(),
            "created_at": "2001-01-01T00:00:00Z",
            "title": "Baker",
            "location": "Springfield",
            "job_type": "Casual",
            "description": "Bake bread"
        }))
        .into_new_vacancy(employer)
        .unwrap();

        assert_eq!(new.employer, employer);
    }

    #[test]
    fn full_mode_reports_every_missing_field() {
        let errors = payload(json!({})).into_new_vacancy(Uuid::new_v4()).unwrap_err();
        let fields = field_messages(&errors);

        for name in ["title", "location", "job_type", "description"] {
            assert_eq!(fields[name], vec![REQUIRED.to_string()], "{name}");
        }
    }

    #[test]
    fn blank_and_long_values_are_rejected() {
        let errors = payload(json!({
            "title": "x".repeat(101),
            "location": "   ",
            "job_type": "Part-time",
            "description": "ok"
        }))
        .into_new_vacancy(Uuid::new_v4())
        .unwrap_err();
        let fields = field_messages(&errors);

        assert_eq!(
            fields["title"],
            vec!["Ensure this field has no more than 100 characters.".to_string()]
        );
        assert_eq!(fields["location"], vec![BLANK.to_string()]);
        assert!(!fields.contains_key("job_type"));
    }

    #[test]
    fn unknown_job_type_is_a_field_error() {
        let errors = payload(json!({ "job_type": "Internship" }))
            .into_changes(WriteMode::Partial)
            .unwrap_err();
        let fields = field_messages(&errors);

        assert_eq!(
            fields["job_type"],
            vec!["\"Internship\" is not a valid choice.".to_string()]
        );
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn job_type_is_matched_without_trimming() {
        let errors = payload(json!({
            "title": "Baker",
            "location": "Springfield",
            "job_type": " Full-time\n",
            "description": "Bake bread"
        }))
        .into_new_vacancy(Uuid::new_v4())
        .unwrap_err();
        let fields = field_messages(&errors);

        assert_eq!(
            fields["job_type"],
            vec!["\" Full-time\n\" is not a valid choice.".to_string()]
        );
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn empty_job_type_is_an_invalid_choice() {
        let errors = payload(json!({ "job_type": "" }))
            .into_changes(WriteMode::Partial)
            .unwrap_err();
        let fields = field_messages(&errors);

        assert_eq!(
            fields["job_type"],
            vec!["\"\" is not a valid choice.".to_string()]
        );
    }

    #[test]
    fn explicit_null_is_rejected_in_every_mode() {
        for mode in [WriteMode::Partial, WriteMode::Full] {
            let errors = payload(json!({
                "title": null,
                "location": "Springfield",
                "job_type": null,
                "description": "Bake bread"
            }))
            .into_changes(mode)
            .unwrap_err();
            let fields = field_messages(&errors);

            assert_eq!(fields["title"], vec![NULL.to_string()], "{mode:?}");
            assert_eq!(fields["job_type"], vec![NULL.to_string()], "{mode:?}");
            assert_eq!(fields.len(), 2, "{mode:?}");
        }
    }

    #[test]
    fn partial_mode_keeps_absent_fields_unset() {
        let changes = payload(json!({ "location": "Shelbyville" }))
            .into_changes(WriteMode::Partial)
            .unwrap();

        assert_eq!(
            changes,
            VacancyChanges {
                location: Some("Shelbyville".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn response_exposes_explicit_field_list() {
        let vacancy = Vacancy {
            id: Uuid::new_v4(),
            employer: Uuid::new_v4(),
            title: "Baker".into(),
            location: "Springfield".into(),
            job_type: JobType::FullTime,
            description: "Bake bread".into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(VacancyResponse::from(vacancy)).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(
            keys,
            vec!["created_at", "description", "employer", "id", "job_type", "location", "title"]
        );
        assert_eq!(value["job_type"], "Full-time");
    }
}
