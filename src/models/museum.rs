//! Museum hall and section models and schemas

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::pagination::PageRequest;

/// Museum hall record
#[derive(Debug, Clone, FromRow)]
pub struct MuseumHall {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Museum section record
#[derive(Debug, Clone, FromRow)]
pub struct MuseumSection {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hall_id: i32,
}

/// Hall with its sections eagerly loaded
#[derive(Debug, Clone)]
pub struct HallWithSections {
    pub hall: MuseumHall,
    pub sections: Vec<MuseumSection>,
}

/// Hall payload for create and update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct HallData {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// Section payload for create and update. The owning hall is fixed at
/// creation and is not part of the update payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SectionData {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// Section create data as stored by the repository
#[derive(Debug, Clone)]
pub struct SectionCreate {
    pub hall_id: i32,
    pub data: SectionData,
}

/// Hall response schema including its sections
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HallOut {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sections: Vec<SectionOut>,
}

impl From<HallWithSections> for HallOut {
    fn from(value: HallWithSections) -> Self {
        Self {
            id: value.hall.id,
            name: value.hall.name,
            description: value.hall.description,
            image_url: value.hall.image_url,
            sections: value.sections.into_iter().map(SectionOut::from).collect(),
        }
    }
}

impl From<MuseumHall> for HallOut {
    fn from(hall: MuseumHall) -> Self {
        HallWithSections {
            hall,
            sections: Vec::new(),
        }
        .into()
    }
}

/// Section response schema
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionOut {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hall_id: i32,
}

impl From<MuseumSection> for SectionOut {
    fn from(section: MuseumSection) -> Self {
        Self {
            id: section.id,
            name: section.name,
            description: section.description,
            image_url: section.image_url,
            hall_id: section.hall_id,
        }
    }
}

/// Filters for the section list
#[derive(Debug, Clone, Default)]
pub struct SectionFilter {
    pub hall_id: Option<i32>,
}

/// Query parameters for plain paginated lists (halls, sections)
#[derive(Debug, Deserialize, IntoParams)]
pub struct MuseumListQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
}

impl MuseumListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
        }
    }
}
