//! Museum hall API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::AppResult,
    models::museum::{HallData, HallOut, MuseumListQuery, SectionData, SectionFilter, SectionOut},
    pagination::Page,
    repository::UnitOfWork,
    services::capability::{Create, Delete, Retrieve, RetrieveAll, Update},
};

use super::{read_upload, AuthenticatedUser};

/// List museum halls with their sections
#[utoipa::path(
    get,
    path = "/museum/halls",
    tag = "museum_halls",
    params(MuseumListQuery),
    responses(
        (status = 200, description = "Paginated hall list")
    )
)]
pub async fn list_halls(
    State(state): State<crate::AppState>,
    Query(query): Query<MuseumListQuery>,
) -> AppResult<Json<Page<HallOut>>> {
    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let page = state
        .services
        .museum_halls
        .retrieve_all(&mut uow, &query.page_request(), &())
        .await?;
    Ok(Json(page))
}

/// Get a hall by ID, including its sections
#[utoipa::path(
    get,
    path = "/museum/halls/{id}",
    tag = "museum_halls",
    params(("id" = i32, Path, description = "Hall ID")),
    responses(
        (status = 200, description = "Hall details", body = HallOut)
    )
)]
pub async fn get_hall(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<HallOut>> {
    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let hall = state.services.museum_halls.retrieve(&mut uow, id).await?;
    Ok(Json(hall))
}

/// Create a museum hall
#[utoipa::path(
    post,
    path = "/museum/halls",
    tag = "museum_halls",
    security(("bearer_auth" = [])),
    request_body = HallData,
    responses(
        (status = 201, description = "Hall created", body = HallOut)
    )
)]
pub async fn create_hall(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<HallData>,
) -> AppResult<(StatusCode, Json<HallOut>)> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let hall = state.services.museum_halls.create(&mut uow, &data).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(hall)))
}

/// Update a museum hall
#[utoipa::path(
    put,
    path = "/museum/halls/{id}",
    tag = "museum_halls",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hall ID")),
    request_body = HallData,
    responses(
        (status = 200, description = "Hall updated", body = HallOut)
    )
)]
pub async fn update_hall(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<HallData>,
) -> AppResult<Json<HallOut>> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let hall = state.services.museum_halls.update(&mut uow, id, &data).await?;
    uow.commit().await?;
    Ok(Json(hall))
}

/// Delete a museum hall; its sections are removed with it
#[utoipa::path(
    delete,
    path = "/museum/halls/{id}",
    tag = "museum_halls",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hall ID")),
    responses(
        (status = 204, description = "Hall deleted")
    )
)]
pub async fn delete_hall(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state.services.museum_halls.delete(&mut uow, id).await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upload or replace the hall image
#[utoipa::path(
    put,
    path = "/museum/halls/{id}/image/upload",
    tag = "museum_halls",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hall ID")),
    responses(
        (status = 200, description = "Image uploaded", body = HallOut)
    )
)]
pub async fn upload_hall_image(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<HallOut>> {
    claims.require_superuser()?;

    let upload = read_upload(multipart, "image").await?;
    upload.ensure_image()?;

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let hall = state
        .services
        .museum_halls
        .upload_image(&mut uow, id, &upload.filename, upload.content)
        .await?;
    uow.commit().await?;
    Ok(Json(hall))
}

/// List the sections of a hall
#[utoipa::path(
    get,
    path = "/museum/halls/{hall_id}/sections",
    tag = "museum_halls",
    params(
        ("hall_id" = i32, Path, description = "Hall ID"),
        MuseumListQuery
    ),
    responses(
        (status = 200, description = "Paginated section list")
    )
)]
pub async fn list_hall_sections(
    State(state): State<crate::AppState>,
    Path(hall_id): Path<i32>,
    Query(query): Query<MuseumListQuery>,
) -> AppResult<Json<Page<SectionOut>>> {
    let filter = SectionFilter {
        hall_id: Some(hall_id),
    };

    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let page = state
        .services
        .museum_sections
        .retrieve_all(&mut uow, &query.page_request(), &filter)
        .await?;
    Ok(Json(page))
}

/// Add a section to a hall
#[utoipa::path(
    post,
    path = "/museum/halls/{hall_id}/sections",
    tag = "museum_halls",
    security(("bearer_auth" = [])),
    params(("hall_id" = i32, Path, description = "Hall ID")),
    request_body = SectionData,
    responses(
        (status = 201, description = "Section created", body = SectionOut)
    )
)]
pub async fn create_hall_section(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(hall_id): Path<i32>,
    Json(data): Json<SectionData>,
) -> AppResult<(StatusCode, Json<SectionOut>)> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let section = state
        .services
        .museum_sections
        .create(&mut uow, hall_id, &data)
        .await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(section)))
}
