//! Event and event application services

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::application::{
        Application, ApplicationCreate, ApplicationData, ApplicationFilter, ApplicationOut,
        ApplicationUpdate,
    },
    models::event::{Event, EventData, EventFilter, EventOut},
    pagination::{Page, PageRequest},
    repository::{
        events::{ApplicationsRepository, EventsRepository},
        Repository, UnitOfWork,
    },
    services::capability::{Create, Delete, Retrieve, RetrieveAll, Update},
    services::email::{Notification, Outbox},
    services::storage::{folders, BlobStore},
};

pub struct EventService {
    storage: Arc<dyn BlobStore>,
}

impl EventService {
    pub fn new(storage: Arc<dyn BlobStore>) -> Self {
        Self { storage }
    }

    /// Replace the event image: the old blob is deleted, the new one
    /// uploaded, and the stored reference updated in the same transaction.
    pub async fn upload_image(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        filename: &str,
        content: Vec<u8>,
    ) -> AppResult<EventOut> {
        let event = EventsRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("Event", id))?;

        let image_url = self
            .storage
            .upload(
                folders::EVENT_IMAGES,
                id,
                event.image_url.as_deref(),
                filename,
                content,
            )
            .await?;

        let updated = EventsRepository::set_image_url(uow.conn(), id, &image_url)
            .await?
            .ok_or(AppError::not_found("Event", id))?;

        tracing::info!("Uploaded image for event with id={}", id);
        Ok(updated.into())
    }
}

#[async_trait]
impl Retrieve for EventService {
    type Entity = Event;
    type Out = EventOut;

    async fn retrieve_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<Event> {
        EventsRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("Event", id))
    }
}

#[async_trait]
impl RetrieveAll for EventService {
    type Entity = Event;
    type Filter = EventFilter;
    type Out = EventOut;

    async fn retrieve_all_instances(
        &self,
        uow: &mut UnitOfWork,
        page: &PageRequest,
        filter: &EventFilter,
    ) -> AppResult<Page<Event>> {
        EventsRepository::retrieve_all(uow.conn(), page, filter).await
    }
}

#[async_trait]
impl Create for EventService {
    type Entity = Event;
    type In = EventData;
    type Out = EventOut;

    async fn create_instance(&self, uow: &mut UnitOfWork, item: &EventData) -> AppResult<Event> {
        EventsRepository::create(uow.conn(), item).await
    }
}

#[async_trait]
impl Update for EventService {
    type Entity = Event;
    type In = EventData;
    type Out = EventOut;

    async fn update_instance(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        item: &EventData,
    ) -> AppResult<Event> {
        EventsRepository::update(uow.conn(), id, item)
            .await?
            .ok_or(AppError::not_found("Event", id))
    }
}

#[async_trait]
impl Delete for EventService {
    async fn delete_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()> {
        if !EventsRepository::exists(uow.conn(), id).await? {
            return Err(AppError::not_found("Event", id));
        }
        EventsRepository::delete(uow.conn(), id).await
    }
}

pub struct EventApplicationService;

impl EventApplicationService {
    pub fn new() -> Self {
        Self
    }

    /// Submit an application for an event that has not started yet.
    /// Queues a "received" notification for post-commit delivery.
    pub async fn create(
        &self,
        uow: &mut UnitOfWork,
        event_id: i32,
        item: &ApplicationData,
        outbox: &mut Outbox,
    ) -> AppResult<ApplicationOut> {
        item.validate()?;

        let event = EventsRepository::retrieve(uow.conn(), event_id)
            .await?
            .ok_or(AppError::not_found("Event", event_id))?;

        event.ensure_registration_open(Utc::now().date_naive())?;

        let application = ApplicationsRepository::create(
            uow.conn(),
            &ApplicationCreate {
                event_id,
                data: item.clone(),
            },
        )
        .await?;

        outbox.push(Notification::ApplicationReceived {
            recipient: application.email.clone(),
            event_name: event.name,
        });

        Ok(application.into())
    }

    /// Overwrite an application. A move to accepted or rejected queues the
    /// matching notification; pending queues none. Re-setting the same
    /// status queues the email again.
    pub async fn update(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        item: &ApplicationUpdate,
        outbox: &mut Outbox,
    ) -> AppResult<ApplicationOut> {
        item.validate()?;

        let application = ApplicationsRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("Application", id))?;

        let event = EventsRepository::retrieve(uow.conn(), application.event_id)
            .await?
            .ok_or(AppError::not_found("Event", application.event_id))?;

        let updated = ApplicationsRepository::update(uow.conn(), id, item)
            .await?
            .ok_or(AppError::not_found("Application", id))?;

        if let Some(notification) =
            Notification::for_status(updated.status, updated.email.clone(), event.name)
        {
            outbox.push(notification);
        }

        Ok(updated.into())
    }
}

impl Default for EventApplicationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Retrieve for EventApplicationService {
    type Entity = Application;
    type Out = ApplicationOut;

    async fn retrieve_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<Application> {
        ApplicationsRepository::retrieve(uow.conn(), id)
            .await?
            .ok_or(AppError::not_found("Application", id))
    }
}

#[async_trait]
impl RetrieveAll for EventApplicationService {
    type Entity = Application;
    type Filter = ApplicationFilter;
    type Out = ApplicationOut;

    async fn retrieve_all_instances(
        &self,
        uow: &mut UnitOfWork,
        page: &PageRequest,
        filter: &ApplicationFilter,
    ) -> AppResult<Page<Application>> {
        ApplicationsRepository::retrieve_all(uow.conn(), page, filter).await
    }
}

#[async_trait]
impl Delete for EventApplicationService {
    async fn delete_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()> {
        if !ApplicationsRepository::exists(uow.conn(), id).await? {
            return Err(AppError::not_found("Application", id));
        }
        ApplicationsRepository::delete(uow.conn(), id).await
    }
}
