use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Casual")]
    Casual,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::FullTime, JobType::PartTime, JobType::Casual];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Casual => "Casual",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidJobType(pub String);

impl FromStr for JobType {
    type Err = InvalidJobType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|jt| jt.as_str() == s)
            .ok_or_else(|| InvalidJobType(s.to_string()))
    }
}

impl TryFrom<String> for JobType {
    type Error = InvalidJobType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
    #[sqlx(rename = "employer_id")]
    pub employer: Uuid,
    pub title: String,
    pub location: String,
    #[sqlx(try_from = "String")]
    pub job_type: JobType,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A validated vacancy ready for insertion. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVacancy {
    pub employer: Uuid,
    pub title: String,
    pub location: String,
    pub job_type: JobType,
    pub description: String,
}

/// Validated field changes. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacancyChanges {
    pub title: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub description: Option<String>,
}

impl VacancyChanges {
    pub fn apply_to(self, vacancy: &mut Vacancy) {
        if let Some(title) = self.title {
            vacancy.title = title;
        }
        if let Some(location) = self.location {
            vacancy.location = location;
        }
        if let Some(job_type) = self.job_type {
            vacancy.job_type = job_type;
        }
        if let Some(description) = self.description {
            vacancy.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_accepts_exact_literals_only() {
        assert_eq!("Full-time".parse::<JobType>(), Ok(JobType::FullTime));
        assert_eq!("Part-time".parse::<JobType>(), Ok(JobType::PartTime));
        assert_eq!("Casual".parse::<JobType>(), Ok(JobType::Casual));
        assert!("full-time".parse::<JobType>().is_err());
        assert!("Contract".parse::<JobType>().is_err());
    }

    #[test]
    fn job_type_serializes_as_literal() {
        assert_eq!(
            serde_json::to_string(&JobType::PartTime).unwrap(),
            "\"Part-time\""
        );
    }

    #[test]
    fn invalid_job_type_message_quotes_value() {
        let err = "Seasonal".parse::<JobType>().unwrap_err();
        assert_eq!(err.to_string(), "\"Seasonal\" is not a valid choice.");
    }

    #[test]
    fn changes_only_touch_present_fields() {
        let mut vacancy = Vacancy {
            id: Uuid::new_v4(),
            employer: Uuid::new_v4(),
            title: "Baker".into(),
            location: "Springfield".into(),
            job_type: JobType::FullTime,
            description: "Bake bread".into(),
            created_at: Utc::now(),
        };
        let before = vacancy.clone();

        VacancyChanges {
            job_type: Some(JobType::Casual),
            ..Default::default()
        }
        .apply_to(&mut vacancy);

        assert_eq!(vacancy.job_type, JobType::Casual);
        assert_eq!(vacancy.title, before.title);
        assert_eq!(vacancy.employer, before.employer);
        assert_eq!(vacancy.created_at, before.created_at);
        assert_eq!(vacancy.to_string(), "Baker");
    }
}
