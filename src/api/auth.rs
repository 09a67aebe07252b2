// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Login surface and session queries.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{Auth, AuthError, CredentialVerifier, Identity, OptionalAuth};
use crate::config::SESSION_COOKIE;
use crate::models::RegisterRequest;
use crate::state::AppState;

/// Login credentials.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login or registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub identity: Identity,
}

/// Response for GET /v1/auth/session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

fn session_cookie(token: String) -> Cookie<'static> {
    // Opaque token only; expiry is owned by the session record, so no
    // max-age here.
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Session established", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Unknown email or wrong password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AuthError> {
    if request.email.is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    if request.password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }

    let Some(identity) = state.users.verify(&request.email, &request.password) else {
        tracing::debug!(email = %request.email, "rejected login attempt");
        return Err(AuthError::InvalidCredentials);
    };

    let token = state.sessions.create(&identity);
    tracing::info!(user = %identity.id, role = %identity.role, "login");

    Ok((
        jar.add(session_cookie(token)),
        Json(LoginResponse { identity }),
    ))
}

/// Register a new patient account and log it in.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account created and logged in", body = LoginResponse),
        (status = 400, description = "Missing field"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>), Response> {
    for (value, field) in [
        (&request.email, "email"),
        (&request.password, "password"),
        (&request.name, "name"),
    ] {
        if value.is_empty() {
            return Err(AuthError::MissingField(field).into_response());
        }
    }

    let identity = state
        .users
        .register(request)
        .map_err(IntoResponse::into_response)?;
    let token = state.sessions.create(&identity);
    tracing::info!(user = %identity.id, "patient account registered");

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token)),
        Json(LoginResponse { identity }),
    ))
}

/// Destroy the current session.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Session destroyed (idempotent)"))
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value());
    }
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

/// Report whether the request carries a live session.
#[utoipa::path(
    get,
    path = "/v1/auth/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Session status", body = SessionResponse),
        (status = 500, description = "Unexpected internal failure"),
    )
)]
pub async fn session(OptionalAuth(identity): OptionalAuth) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: identity.is_some(),
        identity,
    })
}

/// Get the current authenticated identity.
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current identity", body = Identity),
        (status = 401, description = "No live session"),
    )
)]
pub async fn me(Auth(identity): Auth) -> Json<Identity> {
    Json(identity)
}
