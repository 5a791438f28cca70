//! Media, media category and media photo models and schemas

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{models::enums::MediaType, pagination::PageRequest};

/// Media record
#[derive(Debug, Clone, FromRow)]
pub struct Media {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub media_type: MediaType,
    pub category_id: Option<i32>,
}

/// Media photo record
#[derive(Debug, Clone, FromRow)]
pub struct MediaPhoto {
    pub id: i32,
    pub image_url: Option<String>,
    pub media_id: i32,
}

/// Media category record
#[derive(Debug, Clone, FromRow)]
pub struct MediaCategory {
    pub id: i32,
    pub name: String,
    pub media_type: MediaType,
}

/// Media with its photo gallery eagerly loaded
#[derive(Debug, Clone)]
pub struct MediaWithPhotos {
    pub media: Media,
    pub photos: Vec<MediaPhoto>,
}

/// Media payload for create and update (full-field overwrite)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MediaData {
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// 0=method doc, 1=norm doc, 2=study material, 3=photo, 4=video,
    /// 5=presentation
    #[schema(value_type = i16)]
    pub media_type: MediaType,
    pub category_id: Option<i32>,
}

/// Media category payload for create and update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MediaCategoryData {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// 0=method doc, 1=norm doc, 2=study material, 3=photo, 4=video,
    /// 5=presentation
    #[schema(value_type = i16)]
    pub media_type: MediaType,
}

/// Media photo create data as stored by the repository; the image URL is
/// attached after the upload, once the generated id is known
#[derive(Debug, Clone)]
pub struct MediaPhotoCreate {
    pub media_id: i32,
}

/// Media response schema including the photo gallery
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MediaOut {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    /// 0=method doc, 1=norm doc, 2=study material, 3=photo, 4=video,
    /// 5=presentation
    #[schema(value_type = i16)]
    pub media_type: MediaType,
    pub category_id: Option<i32>,
    pub photos: Vec<MediaPhotoOut>,
}

impl From<MediaWithPhotos> for MediaOut {
    fn from(value: MediaWithPhotos) -> Self {
        Self {
            id: value.media.id,
            name: value.media.name,
            description: value.media.description,
            image_url: value.media.image_url,
            url: value.media.url,
            media_type: value.media.media_type,
            category_id: value.media.category_id,
            photos: value.photos.into_iter().map(MediaPhotoOut::from).collect(),
        }
    }
}

impl From<Media> for MediaOut {
    fn from(media: Media) -> Self {
        MediaWithPhotos {
            media,
            photos: Vec::new(),
        }
        .into()
    }
}

/// Media photo response schema
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MediaPhotoOut {
    pub id: i32,
    pub image_url: Option<String>,
    pub media_id: i32,
}

impl From<MediaPhoto> for MediaPhotoOut {
    fn from(photo: MediaPhoto) -> Self {
        Self {
            id: photo.id,
            image_url: photo.image_url,
            media_id: photo.media_id,
        }
    }
}

/// Media category response schema
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MediaCategoryOut {
    pub id: i32,
    pub name: String,
    /// 0=method doc, 1=norm doc, 2=study material, 3=photo, 4=video,
    /// 5=presentation
    #[schema(value_type = i16)]
    pub media_type: MediaType,
}

impl From<MediaCategory> for MediaCategoryOut {
    fn from(category: MediaCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            media_type: category.media_type,
        }
    }
}

/// Filters for the media list
#[derive(Debug, Clone, Default)]
pub struct MediaFilter {
    pub name_contains: Option<String>,
    pub types: Option<Vec<MediaType>>,
    pub category_id: Option<i32>,
}

/// Query parameters for the media list endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct MediaQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
    /// Substring filter on the media name
    pub name_contains: Option<String>,
    /// Media type filter, repeatable
    pub types: Option<Vec<i16>>,
    /// Keep media belonging to this category
    pub category_id: Option<i32>,
}

impl MediaQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn filter(&self) -> Result<MediaFilter, String> {
        Ok(MediaFilter {
            name_contains: self.name_contains.clone(),
            types: parse_types(self.types.as_deref())?,
            category_id: self.category_id,
        })
    }
}

/// Filters for the media category list
#[derive(Debug, Clone, Default)]
pub struct MediaCategoryFilter {
    pub types: Option<Vec<MediaType>>,
}

/// Query parameters for the media category list endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct MediaCategoryQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Items per page
    pub per_page: Option<i64>,
    /// Media type filter, repeatable
    pub types: Option<Vec<i16>>,
}

impl MediaCategoryQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn filter(&self) -> Result<MediaCategoryFilter, String> {
        Ok(MediaCategoryFilter {
            types: parse_types(self.types.as_deref())?,
        })
    }
}

fn parse_types(raw: Option<&[i16]>) -> Result<Option<Vec<MediaType>>, String> {
    raw.map(|values| {
        values
            .iter()
            .map(|v| MediaType::try_from(*v))
            .collect::<Result<Vec<_>, _>>()
    })
    .transpose()
}
