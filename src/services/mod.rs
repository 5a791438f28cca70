//! Business logic services

pub mod capability;
pub mod email;
pub mod events;
pub mod media;
pub mod museum;
pub mod storage;

use std::sync::Arc;

use crate::config::{EmailConfig, StorageConfig};

/// Container for all services
pub struct Services {
    pub events: events::EventService,
    pub applications: events::EventApplicationService,
    pub media: media::MediaService,
    pub media_categories: media::MediaCategoryService,
    pub media_photos: media::MediaPhotoService,
    pub museum_halls: museum::MuseumHallService,
    pub museum_sections: museum::MuseumSectionService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services; the blob store and mailer are shared,
    /// long-lived singletons
    pub fn new(email_config: EmailConfig, storage_config: &StorageConfig) -> Self {
        let storage: Arc<dyn storage::BlobStore> =
            Arc::new(storage::FirebaseStorage::new(storage_config));

        Self {
            events: events::EventService::new(storage.clone()),
            applications: events::EventApplicationService::new(),
            media: media::MediaService::new(storage.clone()),
            media_categories: media::MediaCategoryService::new(),
            media_photos: media::MediaPhotoService::new(storage.clone()),
            museum_halls: museum::MuseumHallService::new(storage.clone()),
            museum_sections: museum::MuseumSectionService::new(storage),
            email: email::EmailService::new(email_config),
        }
    }
}
