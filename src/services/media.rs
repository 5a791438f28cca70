//! Media, media category and media photo services

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::enums::MediaType,
    models::media::{
        Media, MediaCategory, MediaCategoryData, MediaCategoryFilter, MediaCategoryOut, MediaData,
        MediaFilter, MediaOut, MediaPhoto, MediaPhotoCreate, MediaPhotoOut, MediaWithPhotos,
    },
    pagination::{Page, PageRequest},
    repository::{
        media::{MediaCategoriesRepository, MediaPhotosRepository, MediaRepository},
        Repository, UnitOfWork,
    },
    services::capability::{Create, Delete, Retrieve, RetrieveAll, Update},
    services::storage::{folders, BlobStore},
};

pub struct MediaService {
    storage: Arc<dyn BlobStore>,
}

impl MediaService {
    pub fn new(storage: Arc<dyn BlobStore>) -> Self {
        Self { storage }
    }

    /// Replace the media preview image
    pub async fn upload_image(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        filename: &str,
        content: Vec<u8>,
    ) -> AppResult<MediaOut> {
        let media = MediaRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("Media", id))?;

        let image_url = self
            .storage
            .upload(
                folders::MEDIA_IMAGES,
                id,
                media.image_url.as_deref(),
                filename,
                content,
            )
            .await?;

        let updated = MediaRepository::set_image_url(uow.conn(), id, &image_url)
            .await?
            .ok_or(AppError::not_found("Media", id))?;

        tracing::info!("Uploaded image for media with id={}", id);
        Ok(updated.into())
    }

    /// Replace the media file itself
    pub async fn upload_file(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        filename: &str,
        content: Vec<u8>,
    ) -> AppResult<MediaOut> {
        let media = MediaRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("Media", id))?;

        let url = self
            .storage
            .upload(
                folders::MEDIA_FILES,
                id,
                media.url.as_deref(),
                filename,
                content,
            )
            .await?;

        let updated = MediaRepository::set_file_url(uow.conn(), id, &url)
            .await?
            .ok_or(AppError::not_found("Media", id))?;

        tracing::info!("Uploaded file for media with id={}", id);
        Ok(updated.into())
    }
}

#[async_trait]
impl Retrieve for MediaService {
    type Entity = MediaWithPhotos;
    type Out = MediaOut;

    async fn retrieve_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<MediaWithPhotos> {
        MediaRepository::retrieve_with_photos(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("Media", id))
    }
}

#[async_trait]
impl RetrieveAll for MediaService {
    type Entity = MediaWithPhotos;
    type Filter = MediaFilter;
    type Out = MediaOut;

    async fn retrieve_all_instances(
        &self,
        uow: &mut UnitOfWork,
        page: &PageRequest,
        filter: &MediaFilter,
    ) -> AppResult<Page<MediaWithPhotos>> {
        MediaRepository::retrieve_all_with_photos(uow.conn(), page, filter).await
    }
}

#[async_trait]
impl Create for MediaService {
    type Entity = Media;
    type In = MediaData;
    type Out = MediaOut;

    async fn create_instance(&self, uow: &mut UnitOfWork, item: &MediaData) -> AppResult<Media> {
        MediaRepository::create(uow.conn(), item).await
    }
}

#[async_trait]
impl Update for MediaService {
    type Entity = Media;
    type In = MediaData;
    type Out = MediaOut;

    async fn update_instance(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        item: &MediaData,
    ) -> AppResult<Media> {
        MediaRepository::update(uow.conn(), id, item)
            .await?
            .ok_or(AppError::not_found("Media", id))
    }
}

#[async_trait]
impl Delete for MediaService {
    async fn delete_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()> {
        if !MediaRepository::exists(uow.conn(), id).await? {
            return Err(AppError::not_found("Media", id));
        }
        MediaRepository::delete(uow.conn(), id).await
    }
}

pub struct MediaCategoryService;

impl MediaCategoryService {
    pub fn new() -> Self {
        Self
    }

    /// Attach a media to a category; both must exist. This is the only
    /// place the category link is set.
    pub async fn add_media_to_category(
        &self,
        uow: &mut UnitOfWork,
        category_id: i32,
        media_id: i32,
    ) -> AppResult<()> {
        if !MediaCategoriesRepository::exists(uow.conn(), category_id).await? {
            return Err(AppError::not_found("MediaCategory", category_id));
        }
        if !MediaRepository::exists(uow.conn(), media_id).await? {
            return Err(AppError::not_found("Media", media_id));
        }

        MediaRepository::set_category(uow.conn(), media_id, Some(category_id)).await?;
        Ok(())
    }

    /// Detach a media from its category; both must exist
    pub async fn remove_media_from_category(
        &self,
        uow: &mut UnitOfWork,
        category_id: i32,
        media_id: i32,
    ) -> AppResult<()> {
        if !MediaCategoriesRepository::exists(uow.conn(), category_id).await? {
            return Err(AppError::not_found("MediaCategory", category_id));
        }
        if !MediaRepository::exists(uow.conn(), media_id).await? {
            return Err(AppError::not_found("Media", media_id));
        }

        MediaRepository::set_category(uow.conn(), media_id, None).await?;
        Ok(())
    }
}

impl Default for MediaCategoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Retrieve for MediaCategoryService {
    type Entity = MediaCategory;
    type Out = MediaCategoryOut;

    async fn retrieve_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<MediaCategory> {
        MediaCategoriesRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("MediaCategory", id))
    }
}

#[async_trait]
impl RetrieveAll for MediaCategoryService {
    type Entity = MediaCategory;
    type Filter = MediaCategoryFilter;
    type Out = MediaCategoryOut;

    async fn retrieve_all_instances(
        &self,
        uow: &mut UnitOfWork,
        page: &PageRequest,
        filter: &MediaCategoryFilter,
    ) -> AppResult<Page<MediaCategory>> {
        MediaCategoriesRepository::retrieve_all(uow.conn(), page, filter).await
    }
}

#[async_trait]
impl Create for MediaCategoryService {
    type Entity = MediaCategory;
    type In = MediaCategoryData;
    type Out = MediaCategoryOut;

    async fn create_instance(
        &self,
        uow: &mut UnitOfWork,
        item: &MediaCategoryData,
    ) -> AppResult<MediaCategory> {
        MediaCategoriesRepository::create(uow.conn(), item).await
    }
}

#[async_trait]
impl Update for MediaCategoryService {
    type Entity = MediaCategory;
    type In = MediaCategoryData;
    type Out = MediaCategoryOut;

    async fn update_instance(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        item: &MediaCategoryData,
    ) -> AppResult<MediaCategory> {
        MediaCategoriesRepository::update(uow.conn(), id, item)
            .await?
            .ok_or(AppError::not_found("MediaCategory", id))
    }
}

#[async_trait]
impl Delete for MediaCategoryService {
    async fn delete_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()> {
        if !MediaCategoriesRepository::exists(uow.conn(), id).await? {
            return Err(AppError::not_found("MediaCategory", id));
        }
        MediaCategoriesRepository::delete(uow.conn(), id).await
    }
}

pub struct MediaPhotoService {
    storage: Arc<dyn BlobStore>,
}

impl MediaPhotoService {
    pub fn new(storage: Arc<dyn BlobStore>) -> Self {
        Self { storage }
    }

    /// Add a photo to a photo-typed media. The row is created first so the
    /// blob path can be derived from the generated id, then the stored
    /// reference is attached.
    pub async fn create(
        &self,
        uow: &mut UnitOfWork,
        media_id: i32,
        filename: &str,
        content: Vec<u8>,
    ) -> AppResult<MediaPhotoOut> {
        let media = MediaRepository::retrieve(uow.conn(), media_id)
            .await?
            .ok_or(AppError::not_found("Media", media_id))?;

        if media.media_type != MediaType::Photo {
            return Err(AppError::MediaTypeMismatch);
        }

        let photo =
            MediaPhotosRepository::create(uow.conn(), &MediaPhotoCreate { media_id }).await?;

        let image_url = self
            .storage
            .upload(folders::MEDIA_PHOTOS, photo.id, None, filename, content)
            .await?;

        let updated = MediaPhotosRepository::update(uow.conn(), photo.id, &image_url)
            .await?
            .ok_or(AppError::not_found("MediaPhoto", photo.id))?;

        tracing::info!("Created media photo with id={}", updated.id);
        Ok(updated.into())
    }
}

#[async_trait]
impl Retrieve for MediaPhotoService {
    type Entity = MediaPhoto;
    type Out = MediaPhotoOut;

    async fn retrieve_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<MediaPhoto> {
        MediaPhotosRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("MediaPhoto", id))
    }
}

#[async_trait]
impl Delete for MediaPhotoService {
    async fn delete_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()> {
        if !MediaPhotosRepository::exists(uow.conn(), id).await? {
            return Err(AppError::not_found("MediaPhoto", id));
        }
        MediaPhotosRepository::delete(uow.conn(), id).await
    }
}
