//! Shared domain enums.
//!
//! All enums are stored and serialized as small integers; the mappings are
//! part of the wire and storage format and must not change.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MediaType
// ---------------------------------------------------------------------------

/// Kind of a media asset (0=method doc, 1=norm doc, 2=study material,
/// 3=photo, 4=video, 5=presentation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum MediaType {
    MethodDoc = 0,
    NormDoc = 1,
    StudyMaterial = 2,
    Photo = 3,
    Video = 4,
    Presentation = 5,
}

impl TryFrom<i16> for MediaType {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(MediaType::MethodDoc),
            1 => Ok(MediaType::NormDoc),
            2 => Ok(MediaType::StudyMaterial),
            3 => Ok(MediaType::Photo),
            4 => Ok(MediaType::Video),
            5 => Ok(MediaType::Presentation),
            _ => Err(format!("invalid media type: {}", v)),
        }
    }
}

impl From<MediaType> for i16 {
    fn from(t: MediaType) -> Self {
        t as i16
    }
}

// ---------------------------------------------------------------------------
// ApplicationStatus
// ---------------------------------------------------------------------------

/// Review status of an event application (0=accepted, 1=rejected, 2=pending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum ApplicationStatus {
    Accepted = 0,
    Rejected = 1,
    Pending = 2,
}

impl TryFrom<i16> for ApplicationStatus {
    type Error = String;

    fn try_from(v: i16) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ApplicationStatus::Accepted),
            1 => Ok(ApplicationStatus::Rejected),
            2 => Ok(ApplicationStatus::Pending),
            _ => Err(format!("invalid application status: {}", v)),
        }
    }
}

impl From<ApplicationStatus> for i16 {
    fn from(s: ApplicationStatus) -> Self {
        s as i16
    }
}

// ---------------------------------------------------------------------------
// EventStatus
// ---------------------------------------------------------------------------

/// Lifecycle phase of an event relative to the current date
/// (0=planned, 1=passing, 2=passed). Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i16")]
#[repr(i16)]
pub enum EventStatus {
    Planned = 0,
    Passing = 1,
    Passed = 2,
}

impl EventStatus {
    /// Pure status function over the stored dates and a reference day.
    pub fn at(today: chrono::NaiveDate, start_date: chrono::NaiveDate, end_date: chrono::NaiveDate) -> Self {
        if today < start_date {
            EventStatus::Planned
        } else if today < end_date {
            EventStatus::Passing
        } else {
            EventStatus::Passed
        }
    }
}

impl From<EventStatus> for i16 {
    fn from(s: EventStatus) -> Self {
        s as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn media_type_mapping_is_fixed() {
        for (value, expected) in [
            (0, MediaType::MethodDoc),
            (1, MediaType::NormDoc),
            (2, MediaType::StudyMaterial),
            (3, MediaType::Photo),
            (4, MediaType::Video),
            (5, MediaType::Presentation),
        ] {
            assert_eq!(MediaType::try_from(value).unwrap(), expected);
            assert_eq!(i16::from(expected), value);
        }
        assert!(MediaType::try_from(6).is_err());
        assert!(MediaType::try_from(-1).is_err());
    }

    #[test]
    fn application_status_mapping_is_fixed() {
        assert_eq!(ApplicationStatus::try_from(0).unwrap(), ApplicationStatus::Accepted);
        assert_eq!(ApplicationStatus::try_from(1).unwrap(), ApplicationStatus::Rejected);
        assert_eq!(ApplicationStatus::try_from(2).unwrap(), ApplicationStatus::Pending);
        assert!(ApplicationStatus::try_from(3).is_err());
    }

    #[test]
    fn enums_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&MediaType::Photo).unwrap(), "3");
        assert_eq!(serde_json::to_string(&ApplicationStatus::Pending).unwrap(), "2");
        assert_eq!(serde_json::to_string(&EventStatus::Passing).unwrap(), "1");
        assert_eq!(serde_json::from_str::<MediaType>("4").unwrap(), MediaType::Video);
        assert_eq!(
            serde_json::from_str::<ApplicationStatus>("0").unwrap(),
            ApplicationStatus::Accepted
        );
    }

    #[test]
    fn event_status_boundaries() {
        let start = day(2026, 6, 10);
        let end = day(2026, 6, 12);

        assert_eq!(EventStatus::at(day(2026, 6, 9), start, end), EventStatus::Planned);
        assert_eq!(EventStatus::at(day(2026, 6, 10), start, end), EventStatus::Passing);
        assert_eq!(EventStatus::at(day(2026, 6, 11), start, end), EventStatus::Passing);
        assert_eq!(EventStatus::at(day(2026, 6, 12), start, end), EventStatus::Passed);
        assert_eq!(EventStatus::at(day(2026, 6, 13), start, end), EventStatus::Passed);
    }
}
