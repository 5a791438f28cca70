//! Event model and schemas

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::enums::EventStatus,
    pagination::PageRequest,
};

/// Event record
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub participants: Option<String>,
    pub coordinator_contact: Option<String>,
    pub created_at: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Event {
    /// Status relative to a reference day
    pub fn status_on(&self, today: NaiveDate) -> EventStatus {
        EventStatus::at(today, self.start_date, self.end_date)
    }

    /// Status relative to the current date
    pub fn status(&self) -> EventStatus {
        self.status_on(Utc::now().date_naive())
    }

    /// Applications are only accepted before the event starts.
    pub fn ensure_registration_open(&self, today: NaiveDate) -> AppResult<()> {
        if today >= self.end_date {
            return Err(AppError::EventAlreadyFinished(self.id));
        }
        if today >= self.start_date {
            return Err(AppError::EventAlreadyStarted(self.id));
        }
        Ok(())
    }
}

/// Event payload for create and update (full-field overwrite)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EventData {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub short_description: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(max = 255))]
    pub participants: Option<String>,
    #[validate(length(max = 255))]
    pub coordinator_contact: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Event response schema; `status` is computed at read time
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventOut {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub participants: Option<String>,
    pub coordinator_contact: Option<String>,
    pub created_at: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 0=planned, 1=passing, 2=passed
    #[schema(value_type = i16)]
    pub status: EventStatus,
}

impl From<Event> for EventOut {
    fn from(event: Event) -> Self {
        let status = event.status();
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            short_description: event.short_description,
            image_url: event.image_url,
            location: event.location,
            participants: event.participants,
            coordinator_contact: event.coordinator_contact,
            created_at: event.created_at,
            start_date: event.start_date,
            end_date: event.end_date,
            status,
        }
    }
}

/// Filters for the event list
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub name_contains: Option<String>,
    pub start_dt: Option<NaiveDate>,
    pub end_dt: Option<NaiveDate>,
}

/// Query parameters for the event list endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct EventQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
    /// Substring filter on the event name
    pub name_contains: Option<String>,
    /// Keep events starting on or after this date (YYYY-MM-DD)
    pub start_dt: Option<NaiveDate>,
    /// Keep events starting on or before this date (YYYY-MM-DD)
    pub end_dt: Option<NaiveDate>,
}

impl EventQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn filter(&self) -> EventFilter {
        EventFilter {
            name_contains: self.name_contains.clone(),
            start_dt: self.start_dt,
            end_dt: self.end_dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: NaiveDate, end: NaiveDate) -> Event {
        Event {
            id: 7,
            name: "Open lecture".to_string(),
            description: None,
            short_description: None,
            image_url: None,
            location: None,
            participants: None,
            coordinator_contact: None,
            created_at: day(2026, 1, 1),
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn registration_open_before_start() {
        let e = event(day(2026, 5, 10), day(2026, 5, 12));
        assert!(e.ensure_registration_open(day(2026, 5, 9)).is_ok());
    }

    #[test]
    fn registration_blocked_from_start_day() {
        let e = event(day(2026, 5, 10), day(2026, 5, 12));
        assert!(matches!(
            e.ensure_registration_open(day(2026, 5, 10)),
            Err(AppError::EventAlreadyStarted(7))
        ));
        assert!(matches!(
            e.ensure_registration_open(day(2026, 5, 11)),
            Err(AppError::EventAlreadyStarted(7))
        ));
    }

    #[test]
    fn registration_finished_from_end_day() {
        let e = event(day(2026, 5, 10), day(2026, 5, 12));
        assert!(matches!(
            e.ensure_registration_open(day(2026, 5, 12)),
            Err(AppError::EventAlreadyFinished(7))
        ));
        assert!(matches!(
            e.ensure_registration_open(day(2026, 6, 1)),
            Err(AppError::EventAlreadyFinished(7))
        ));
    }
}
