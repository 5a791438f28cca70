//! Events API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::{Multipart, Query as ListQuery};

use crate::{
    error::{AppError, AppResult},
    models::application::{ApplicationData, ApplicationOut, ApplicationQuery},
    models::event::{EventData, EventOut, EventQuery},
    pagination::Page,
    repository::UnitOfWork,
    services::capability::{Create, Delete, Retrieve, RetrieveAll, Update},
    services::email::Outbox,
};

use super::{read_upload, AuthenticatedUser};

/// List events with filters and pagination
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(EventQuery),
    responses(
        (status = 200, description = "Paginated event list")
    )
)]
pub async fn list_events(
    State(state): State<crate::AppState>,
    Query(query): Query<EventQuery>,
) -> AppResult<Json<Page<EventOut>>> {
    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let page = state
        .services
        .events
        .retrieve_all(&mut uow, &query.page_request(), &query.filter())
        .await?;
    Ok(Json(page))
}

/// Get event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = EventOut)
    )
)]
pub async fn get_event(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EventOut>> {
    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let event = state.services.events.retrieve(&mut uow, id).await?;
    Ok(Json(event))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    security(("bearer_auth" = [])),
    request_body = EventData,
    responses(
        (status = 201, description = "Event created", body = EventOut)
    )
)]
pub async fn create_event(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<EventData>,
) -> AppResult<(StatusCode, Json<EventOut>)> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let event = state.services.events.create(&mut uow, &data).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    request_body = EventData,
    responses(
        (status = 200, description = "Event updated", body = EventOut)
    )
)]
pub async fn update_event(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<EventData>,
) -> AppResult<Json<EventOut>> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let event = state.services.events.update(&mut uow, id, &data).await?;
    uow.commit().await?;
    Ok(Json(event))
}

/// Delete an event; its applications are removed with it
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted")
    )
)]
pub async fn delete_event(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state.services.events.delete(&mut uow, id).await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload or replace the event image
#[utoipa::path(
    put,
    path = "/events/{id}/image/upload",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Image uploaded", body = EventOut)
    )
)]
pub async fn upload_event_image(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<EventOut>> {
    claims.require_superuser()?;

    let upload = read_upload(multipart, "image").await?;
    upload.ensure_image()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let event = state
        .services
        .events
        .upload_image(&mut uow, id, &upload.filename, upload.content)
        .await?;
    uow.commit().await?;
    Ok(Json(event))
}

/// List applications submitted for an event
#[utoipa::path(
    get,
    path = "/events/{event_id}/applications",
    tag = "events",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
        ApplicationQuery
    ),
    responses(
        (status = 200, description = "Paginated application list")
    )
)]
pub async fn list_event_applications(
    State(state): State<crate::AppState>,
    Path(event_id): Path<i32>,
    ListQuery(query): ListQuery<ApplicationQuery>,
) -> AppResult<Json<Page<ApplicationOut>>> {
    let filter = query.filter(event_id).map_err(AppError::Validation)?;

    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let page = state
        .services
        .applications
        .retrieve_all(&mut uow, &query.page_request(), &filter)
        .await?;
    Ok(Json(page))
}

/// Submit an application for an upcoming event (open endpoint)
#[utoipa::path(
    post,
    path = "/events/{event_id}/applications",
    tag = "events",
    params(("event_id" = i32, Path, description = "Event ID")),
    request_body = ApplicationData,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationOut),
        (status = 400, description = "Event already started or finished")
    )
)]
pub async fn create_event_application(
    State(state): State<crate::AppState>,
    Path(event_id): Path<i32>,
    Json(data): Json<ApplicationData>,
) -> AppResult<(StatusCode, Json<ApplicationOut>)> {
    let mut outbox = Outbox::new();
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let application = state
        .services
        .applications
        .create(&mut uow, event_id, &data, &mut outbox)
        .await?;
    uow.commit().await?;

    // Notifications go out only after the commit succeeded
    outbox.dispatch(state.services.email.clone());

    Ok((StatusCode::CREATED, Json(application)))
}
