//! Event application model and schemas

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{models::enums::ApplicationStatus, pagination::PageRequest};

/// Event application record
#[derive(Debug, Clone, FromRow)]
pub struct Application {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birthdate: NaiveDate,
    pub comment: Option<String>,
    pub study_organisation: String,
    pub status: ApplicationStatus,
    pub event_id: i32,
}

/// Applicant payload submitted with a new application
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ApplicationData {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub phone: String,
    pub birthdate: NaiveDate,
    #[validate(length(max = 255))]
    pub comment: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub study_organisation: String,
}

/// Application update payload; the status drives the notification emails
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ApplicationUpdate {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub phone: String,
    pub birthdate: NaiveDate,
    #[validate(length(max = 255))]
    pub comment: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub study_organisation: String,
    /// 0=accepted, 1=rejected, 2=pending
    #[schema(value_type = i16)]
    pub status: ApplicationStatus,
}

/// Application create data as stored by the repository
#[derive(Debug, Clone)]
pub struct ApplicationCreate {
    pub event_id: i32,
    pub data: ApplicationData,
}

/// Application response schema
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationOut {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub birthdate: NaiveDate,
    pub comment: Option<String>,
    pub study_organisation: String,
    /// 0=accepted, 1=rejected, 2=pending
    #[schema(value_type = i16)]
    pub status: ApplicationStatus,
    pub event_id: i32,
}

impl From<Application> for ApplicationOut {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            full_name: application.full_name,
            email: application.email,
            phone: application.phone,
            birthdate: application.birthdate,
            comment: application.comment,
            study_organisation: application.study_organisation,
            status: application.status,
            event_id: application.event_id,
        }
    }
}

/// Filters for the application list
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub name_contains: Option<String>,
    pub statuses: Option<Vec<ApplicationStatus>>,
    pub event_id: Option<i32>,
}

/// Query parameters for listing applications of an event
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApplicationQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
    /// Substring filter on the applicant name
    pub name_contains: Option<String>,
    /// Status filter, repeatable (0=accepted, 1=rejected, 2=pending)
    pub statuses: Option<Vec<i16>>,
}

impl ApplicationQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn filter(&self, event_id: i32) -> Result<ApplicationFilter, String> {
        let statuses = self
            .statuses
            .as_ref()
            .map(|raw| {
                raw.iter()
                    .map(|v| ApplicationStatus::try_from(*v))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(ApplicationFilter {
            name_contains: self.name_contains.clone(),
            statuses,
            event_id: Some(event_id),
        })
    }
}
