//! Museum section API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::AppResult,
    models::museum::{SectionData, SectionOut},
    repository::UnitOfWork,
    services::capability::{Delete, Retrieve, Update},
};

use super::{read_upload, AuthenticatedUser};

/// Get a section by ID
#[utoipa::path(
    get,
    path = "/museum/sections/{id}",
    tag = "museum_sections",
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section details", body = SectionOut)
    )
)]
pub async fn get_section(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<SectionOut>> {
    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let section = state.services.museum_sections.retrieve(&mut uow, id).await?;
    Ok(Json(section))
}

/// Update a section; the owning hall cannot be changed here
#[utoipa::path(
    put,
    path = "/museum/sections/{id}",
    tag = "museum_sections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Section ID")),
    request_body = SectionData,
    responses(
        (status = 200, description = "Section updated", body = SectionOut)
    )
)]
pub async fn update_section(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<SectionData>,
) -> AppResult<Json<SectionOut>> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let section = state
        .services
        .museum_sections
        .update(&mut uow, id, &data)
        .await?;
    uow.commit().await?;
    Ok(Json(section))
}

/// Delete a section
#[utoipa::path(
    delete,
    path = "/museum/sections/{id}",
    tag = "museum_sections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 204, description = "Section deleted")
    )
)]
pub async fn delete_section(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state.services.museum_sections.delete(&mut uow, id).await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload or replace the section image
#[utoipa::path(
    put,
    path = "/museum/sections/{id}/image/upload",
    tag = "museum_sections",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Image uploaded", body = SectionOut)
    )
)]
pub async fn upload_section_image(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<SectionOut>> {
    claims.require_superuser()?;

    let upload = read_upload(multipart, "image").await?;
    upload.ensure_image()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let section = state
        .services
        .museum_sections
        .upload_image(&mut uow, id, &upload.filename, upload.content)
        .await?;
    uow.commit().await?;
    Ok(Json(section))
}
