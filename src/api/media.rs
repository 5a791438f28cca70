//! Media API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::{Multipart, Query as ListQuery};

use crate::{
    error::{AppError, AppResult},
    models::media::{MediaData, MediaOut, MediaPhotoOut, MediaQuery},
    pagination::Page,
    repository::UnitOfWork,
    services::capability::{Create, Delete, Retrieve, RetrieveAll, Update},
};

use super::{read_upload, AuthenticatedUser};

/// List media with filters and pagination; photo galleries are included
#[utoipa::path(
    get,
    path = "/media",
    tag = "media",
    params(MediaQuery),
    responses(
        (status = 200, description = "Paginated media list")
    )
)]
pub async fn list_media(
    State(state): State<crate::AppState>,
    ListQuery(query): ListQuery<MediaQuery>,
) -> AppResult<Json<Page<MediaOut>>> {
    let filter = query.filter().map_err(AppError::Validation)?;

    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let page = state
        .services
        .media
        .retrieve_all(&mut uow, &query.page_request(), &filter)
        .await?;
    Ok(Json(page))
}

/// Get media by ID, including its photo gallery
#[utoipa::path(
    get,
    path = "/media/{id}",
    tag = "media",
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media details", body = MediaOut)
    )
)]
pub async fn get_media(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MediaOut>> {
    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let media = state.services.media.retrieve(&mut uow, id).await?;
    Ok(Json(media))
}

/// Create a media record
#[utoipa::path(
    post,
    path = "/media",
    tag = "media",
    security(("bearer_auth" = [])),
    request_body = MediaData,
    responses(
        (status = 201, description = "Media created", body = MediaOut)
    )
)]
pub async fn create_media(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<MediaData>,
) -> AppResult<(StatusCode, Json<MediaOut>)> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let media = state.services.media.create(&mut uow, &data).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(media)))
}

/// Update a media record
#[utoipa::path(
    put,
    path = "/media/{id}",
    tag = "media",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Media ID")),
    request_body = MediaData,
    responses(
        (status = 200, description = "Media updated", body = MediaOut)
    )
)]
pub async fn update_media(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<MediaData>,
) -> AppResult<Json<MediaOut>> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let media = state.services.media.update(&mut uow, id, &data).await?;
    uow.commit().await?;
    Ok(Json(media))
}

/// Delete a media record; its photos are removed with it
#[utoipa::path(
    delete,
    path = "/media/{id}",
    tag = "media",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 204, description = "Media deleted")
    )
)]
pub async fn delete_media(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state.services.media.delete(&mut uow, id).await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload or replace the media preview image
#[utoipa::path(
    put,
    path = "/media/{id}/image/upload",
    tag = "media",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Image uploaded", body = MediaOut)
    )
)]
pub async fn upload_media_image(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<MediaOut>> {
    claims.require_superuser()?;

    let upload = read_upload(multipart, "image").await?;
    upload.ensure_image()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let media = state
        .services
        .media
        .upload_image(&mut uow, id, &upload.filename, upload.content)
        .await?;
    uow.commit().await?;
    Ok(Json(media))
}

/// Upload or replace the media file
#[utoipa::path(
    put,
    path = "/media/{id}/file/upload",
    tag = "media",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 200, description = "File uploaded", body = MediaOut)
    )
)]
pub async fn upload_media_file(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<MediaOut>> {
    claims.require_superuser()?;

    let upload = read_upload(multipart, "file").await?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let media = state
        .services
        .media
        .upload_file(&mut uow, id, &upload.filename, upload.content)
        .await?;
    uow.commit().await?;
    Ok(Json(media))
}

/// Add a photo to a photo-typed media
#[utoipa::path(
    post,
    path = "/media/{media_id}/photos",
    tag = "media",
    security(("bearer_auth" = [])),
    params(("media_id" = i32, Path, description = "Media ID")),
    responses(
        (status = 201, description = "Photo created", body = MediaPhotoOut),
        (status = 400, description = "Media is not photo-typed")
    )
)]
pub async fn create_media_photo(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(media_id): Path<i32>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<MediaPhotoOut>)> {
    claims.require_superuser()?;

    let upload = read_upload(multipart, "image").await?;
    upload.ensure_image()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let photo = state
        .services
        .media_photos
        .create(&mut uow, media_id, &upload.filename, upload.content)
        .await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// Delete a media photo
#[utoipa::path(
    delete,
    path = "/media/photos/{photo_id}",
    tag = "media",
    security(("bearer_auth" = [])),
    params(("photo_id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted")
    )
)]
pub async fn delete_media_photo(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(photo_id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state.services.media_photos.delete(&mut uow, photo_id).await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
