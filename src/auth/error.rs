// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::roles::Role;

/// Authentication error type.
///
/// Session decay (corruption, expiry) is never surfaced through this type by
/// the session store itself - it degrades to "no identity" there. These
/// variants exist for the HTTP surface, where a request that *claimed* a
/// session must still be answered with something meaningful.
#[derive(Debug)]
pub enum AuthError {
    /// A required login field was empty or absent
    MissingField(&'static str),
    /// Email/password pair did not match any account
    InvalidCredentials,
    /// The route requires a session and the request carries none
    SessionRequired,
    /// The session cookie referenced an unparseable or partial record
    CorruptedSession,
    /// The session record expired
    ExpiredSession,
    /// Authenticated, but the role is not permitted on this route
    InsufficientRole { required: Vec<Role>, actual: Role },
    /// Unexpected internal failure
    InternalError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<Role>,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingField(_) => "missing_field",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::SessionRequired => "session_required",
            AuthError::CorruptedSession => "corrupted_session",
            AuthError::ExpiredSession => "expired_session",
            AuthError::InsufficientRole { .. } => "insufficient_role",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::SessionRequired
            | AuthError::CorruptedSession
            | AuthError::ExpiredSession => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingField(field) => write!(f, "Missing required field: {field}"),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::SessionRequired => write!(f, "An active session is required"),
            AuthError::CorruptedSession => write!(f, "Session data was invalid; please log in again"),
            AuthError::ExpiredSession => write!(f, "Session has expired; please log in again"),
            AuthError::InsufficientRole { required, actual } => {
                let wanted: Vec<String> = required.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "Access denied: requires role {} but you are logged in as {actual}",
                    wanted.join(" or ")
                )
            }
            AuthError::InternalError(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let (required, actual) = match &self {
            AuthError::InsufficientRole { required, actual } => {
                (Some(required.clone()), Some(*actual))
            }
            _ => (None, None),
        };
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code,
            required,
            actual,
        });
        (status, body).into_response()
    }
}
