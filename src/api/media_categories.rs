//! Media category API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query as ListQuery;

use crate::{
    error::{AppError, AppResult},
    models::media::{MediaCategoryData, MediaCategoryOut, MediaCategoryQuery},
    pagination::Page,
    repository::UnitOfWork,
    services::capability::{Create, Delete, Retrieve, RetrieveAll, Update},
};

use super::AuthenticatedUser;

/// List media categories
#[utoipa::path(
    get,
    path = "/media/categories",
    tag = "media_categories",
    params(MediaCategoryQuery),
    responses(
        (status = 200, description = "Paginated category list")
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    ListQuery(query): ListQuery<MediaCategoryQuery>,
) -> AppResult<Json<Page<MediaCategoryOut>>> {
    let filter = query.filter().map_err(AppError::Validation)?;

    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let page = state
        .services
        .media_categories
        .retrieve_all(&mut uow, &query.page_request(), &filter)
        .await?;
    Ok(Json(page))
}

/// Get a media category by ID
#[utoipa::path(
    get,
    path = "/media/categories/{id}",
    tag = "media_categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = MediaCategoryOut)
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MediaCategoryOut>> {
    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let category = state.services.media_categories.retrieve(&mut uow, id).await?;
    Ok(Json(category))
}

/// Create a media category
#[utoipa::path(
    post,
    path = "/media/categories",
    tag = "media_categories",
    security(("bearer_auth" = [])),
    request_body = MediaCategoryData,
    responses(
        (status = 201, description = "Category created", body = MediaCategoryOut)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<MediaCategoryData>,
) -> AppResult<(StatusCode, Json<MediaCategoryOut>)> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let category = state.services.media_categories.create(&mut uow, &data).await?;
    uow.commit().await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a media category
#[utoipa::path(
    put,
    path = "/media/categories/{id}",
    tag = "media_categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = MediaCategoryData,
    responses(
        (status = 200, description = "Category updated", body = MediaCategoryOut)
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<MediaCategoryData>,
) -> AppResult<Json<MediaCategoryOut>> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let category = state
        .services
        .media_categories
        .update(&mut uow, id, &data)
        .await?;
    uow.commit().await?;
    Ok(Json(category))
}

/// Delete a media category; member media keep existing without a category
#[utoipa::path(
    delete,
    path = "/media/categories/{id}",
    tag = "media_categories",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state.services.media_categories.delete(&mut uow, id).await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Put a media into this category
#[utoipa::path(
    post,
    path = "/media/categories/{category_id}/media/{media_id}",
    tag = "media_categories",
    security(("bearer_auth" = [])),
    params(
        ("category_id" = i32, Path, description = "Category ID"),
        ("media_id" = i32, Path, description = "Media ID")
    ),
    responses(
        (status = 204, description = "Media linked to category")
    )
)]
pub async fn add_media_to_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((category_id, media_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state
        .services
        .media_categories
        .add_media_to_category(&mut uow, category_id, media_id)
        .await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Take a media out of this category
#[utoipa::path(
    delete,
    path = "/media/categories/{category_id}/media/{media_id}",
    tag = "media_categories",
    security(("bearer_auth" = [])),
    params(
        ("category_id" = i32, Path, description = "Category ID"),
        ("media_id" = i32, Path, description = "Media ID")
    ),
    responses(
        (status = 204, description = "Media unlinked from category")
    )
)]
pub async fn remove_media_from_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((category_id, media_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state
        .services
        .media_categories
        .remove_media_from_category(&mut uow, category_id, media_id)
        .await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
