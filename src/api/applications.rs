//! Event application API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::application::{ApplicationOut, ApplicationUpdate},
    repository::UnitOfWork,
    services::capability::{Delete, Retrieve},
    services::email::Outbox,
};

use super::AuthenticatedUser;

/// Get an application by ID
#[utoipa::path(
    get,
    path = "/events/applications/{id}",
    tag = "applications",
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application details", body = ApplicationOut)
    )
)]
pub async fn get_application(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApplicationOut>> {
    let mut uow = UnitOfWork::begin_read_only(&state.pool).await?;
    let application = state.services.applications.retrieve(&mut uow, id).await?;
    Ok(Json(application))
}

/// Update an application; accepting or rejecting notifies the applicant
#[utoipa::path(
    put,
    path = "/events/applications/{id}",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Application ID")),
    request_body = ApplicationUpdate,
    responses(
        (status = 200, description = "Application updated", body = ApplicationOut)
    )
)]
pub async fn update_application(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<ApplicationUpdate>,
) -> AppResult<Json<ApplicationOut>> {
    claims.require_superuser()?;

    let mut outbox = Outbox::new();
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let application = state
        .services
        .applications
        .update(&mut uow, id, &data, &mut outbox)
        .await?;
    uow.commit().await?;

    outbox.dispatch(state.services.email.clone());

    Ok(Json(application))
}

/// Delete an application
#[utoipa::path(
    delete,
    path = "/events/applications/{id}",
    tag = "applications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted")
    )
)]
pub async fn delete_application(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    state.services.applications.delete(&mut uow, id).await?;
    uow.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
