// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Account management endpoints (admin only).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{AdminOnly, Identity},
    error::ApiError,
    models::{CreateUserRequest, UpdateUserRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "Users",
    responses((status = 200, body = [Identity]), (status = 403))
)]
pub async fn list_users(_admin: AdminOnly, State(state): State<AppState>) -> Json<Vec<Identity>> {
    Json(state.users.list())
}

#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    tag = "Users",
    responses((status = 201, body = Identity), (status = 403), (status = 409))
)]
pub async fn create_user(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Identity>), ApiError> {
    let identity = state.users.create_user(request)?;
    tracing::info!(user = %identity.id, role = %identity.role, "account created");
    Ok((StatusCode::CREATED, Json(identity)))
}

#[utoipa::path(
    put,
    path = "/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "Account identifier")),
    request_body = UpdateUserRequest,
    tag = "Users",
    responses((status = 200, body = Identity), (status = 403), (status = 404))
)]
pub async fn update_user(
    _admin: AdminOnly,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<Identity>, ApiError> {
    Ok(Json(state.users.update_user(&user_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "Account identifier")),
    tag = "Users",
    responses((status = 204), (status = 400), (status = 403), (status = 404))
)]
pub async fn delete_user(
    AdminOnly(admin): AdminOnly,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if admin.id == user_id {
        return Err(ApiError::bad_request("You cannot delete your own account"));
    }
    state.users.delete_user(&user_id)?;
    tracing::info!(user = %user_id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
