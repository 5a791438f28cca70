//! Museum hall and section services

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::museum::{
        HallData, HallOut, HallWithSections, MuseumHall, MuseumSection, SectionCreate, SectionData,
        SectionFilter, SectionOut,
    },
    pagination::{Page, PageRequest},
    repository::{
        museum::{HallsRepository, SectionsRepository},
        Repository, UnitOfWork,
    },
    services::capability::{Create, Delete, Retrieve, RetrieveAll, Update},
    services::storage::{folders, BlobStore},
};

pub struct MuseumHallService {
    storage: Arc<dyn BlobStore>,
}

impl MuseumHallService {
    pub fn new(storage: Arc<dyn BlobStore>) -> Self {
        Self { storage }
    }

    /// Replace the hall image
    pub async fn upload_image(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        filename: &str,
        content: Vec<u8>,
    ) -> AppResult<HallOut> {
        let hall = HallsRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("MuseumHall", id))?;

        let image_url = self
            .storage
            .upload(
                folders::HALL_IMAGES,
                id,
                hall.image_url.as_deref(),
                filename,
                content,
            )
            .await?;

        let updated = HallsRepository::set_image_url(uow.conn(), id, &image_url)
            .await?
            .ok_or(AppError::not_found("MuseumHall", id))?;

        tracing::info!("Uploaded image for museum hall with id={}", id);
        Ok(updated.into())
    }
}

#[async_trait]
impl Retrieve for MuseumHallService {
    type Entity = HallWithSections;
    type Out = HallOut;

    async fn retrieve_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<HallWithSections> {
        HallsRepository::retrieve_with_sections(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("MuseumHall", id))
    }
}

#[async_trait]
impl RetrieveAll for MuseumHallService {
    type Entity = HallWithSections;
    type Filter = ();
    type Out = HallOut;

    async fn retrieve_all_instances(
        &self,
        uow: &mut UnitOfWork,
        page: &PageRequest,
        _filter: &(),
    ) -> AppResult<Page<HallWithSections>> {
        HallsRepository::retrieve_all_with_sections(uow.conn(), page).await
    }
}

#[async_trait]
impl Create for MuseumHallService {
    type Entity = MuseumHall;
    type In = HallData;
    type Out = HallOut;

    async fn create_instance(&self, uow: &mut UnitOfWork, item: &HallData) -> AppResult<MuseumHall> {
        HallsRepository::create(uow.conn(), item).await
    }
}

#[async_trait]
impl Update for MuseumHallService {
    type Entity = MuseumHall;
    type In = HallData;
    type Out = HallOut;

    async fn update_instance(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        item: &HallData,
    ) -> AppResult<MuseumHall> {
        HallsRepository::update(uow.conn(), id, item)
            .await?
            .ok_or(AppError::not_found("MuseumHall", id))
    }
}

#[async_trait]
impl Delete for MuseumHallService {
    async fn delete_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()> {
        if !HallsRepository::exists(uow.conn(), id).await? {
            return Err(AppError::not_found("MuseumHall", id));
        }
        HallsRepository::delete(uow.conn(), id).await
    }
}

pub struct MuseumSectionService {
    storage: Arc<dyn BlobStore>,
}

impl MuseumSectionService {
    pub fn new(storage: Arc<dyn BlobStore>) -> Self {
        Self { storage }
    }

    /// Add a section to an existing hall. The owning hall is fixed here;
    /// updates cannot reassign it.
    pub async fn create(
        &self,
        uow: &mut UnitOfWork,
        hall_id: i32,
        item: &SectionData,
    ) -> AppResult<SectionOut> {
        item.validate()?;

        if !HallsRepository::exists(uow.conn(), hall_id).await? {
            return Err(AppError::not_found("MuseumHall", hall_id));
        }

        let section = SectionsRepository::create(
            uow.conn(),
            &SectionCreate {
                hall_id,
                data: item.clone(),
            },
        )
        .await?;

        Ok(section.into())
    }

    /// Replace the section image
    pub async fn upload_image(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        filename: &str,
        content: Vec<u8>,
    ) -> AppResult<SectionOut> {
        let section = SectionsRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("MuseumSection", id))?;

        let image_url = self
            .storage
            .upload(
                folders::SECTION_IMAGES,
                id,
                section.image_url.as_deref(),
                filename,
                content,
            )
            .await?;

        let updated = SectionsRepository::set_image_url(uow.conn(), id, &image_url)
            .await?
            .ok_or(AppError::not_found("MuseumSection", id))?;

        tracing::info!("Uploaded image for museum section with id={}", id);
        Ok(updated.into())
    }
}

#[async_trait]
impl Retrieve for MuseumSectionService {
    type Entity = MuseumSection;
    type Out = SectionOut;

    async fn retrieve_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<MuseumSection> {
        SectionsRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("MuseumSection", id))
    }
}

#[async_trait]
impl RetrieveAll for MuseumSectionService {
    type Entity = MuseumSection;
    type Filter = SectionFilter;
    type Out = SectionOut;

    async fn retrieve_all_instances(
        &self,
        uow: &mut UnitOfWork,
        page: &PageRequest,
        filter: &SectionFilter,
    ) -> AppResult<Page<MuseumSection>> {
        if let Some(hall_id) = filter.hall_id {
            if !HallsRepository::exists(uow.conn(), hall_id).await? {
                return Err(AppError::not_found("MuseumHall", hall_id));
            }
        }

        SectionsRepository::retrieve_all(uow.conn(), page, filter).await
    }
}

#[async_trait]
impl Update for MuseumSectionService {
    type Entity = MuseumSection;
    type In = SectionData;
    type Out = SectionOut;

    async fn update_instance(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        item: &SectionData,
    ) -> AppResult<MuseumSection> {
        SectionsRepository::update(uow.conn(), id, item)
            .await?
            .ok_or(AppError::not_found("MuseumSection", id))
    }
}

#[async_trait]
impl Delete for MuseumSectionService {
    async fn delete_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()> {
        if !SectionsRepository::exists(uow.conn(), id).await? {
            return Err(AppError::not_found("MuseumSection", id));
        }
        SectionsRepository::delete(uow.conn(), id).await
    }
}
