// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Axum extractors for authenticated identities.
//!
//! Use the `Auth` extractor in handlers to require a session:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is the session's Identity
//! }
//! ```
//!
//! The guard middleware normally resolves the session first and stashes the
//! identity in request extensions; the extractors fall back to resolving the
//! cookie themselves so handlers also work when invoked directly (tests, or
//! routers built without the middleware stack).

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::config::SESSION_COOKIE;
use crate::session::store::SessionError;
use crate::state::AppState;

use super::{AuthError, Identity};

/// The session token carried by the request, if any.
pub fn session_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Resolve the request's identity, preferring what middleware already did.
fn identity_from_parts(parts: &Parts, state: &AppState) -> Result<Identity, AuthError> {
    if let Some(identity) = parts.extensions.get::<Identity>() {
        return Ok(identity.clone());
    }

    let token = session_token(parts).ok_or(AuthError::SessionRequired)?;
    match state.sessions.inspect(&token) {
        Ok(record) => Ok(record.identity),
        Err(err) => {
            // Invalid records are scrubbed so the failure is not re-diagnosed.
            state.sessions.revoke(&token);
            Err(match err {
                SessionError::Missing => AuthError::SessionRequired,
                SessionError::Expired => AuthError::ExpiredSession,
                SessionError::Partial(_) | SessionError::Corrupted(_) => {
                    AuthError::CorruptedSession
                }
            })
        }
    }
}

/// Extractor for authenticated identities.
pub struct Auth(pub Identity);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        identity_from_parts(parts, state).map(Auth)
    }
}

/// Extractor that requires the admin role.
pub struct AdminOnly(pub Identity);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = identity_from_parts(parts, state)?;
        if !identity.is_admin() {
            return Err(AuthError::InsufficientRole {
                required: vec![super::Role::Admin],
                actual: identity.role,
            });
        }
        Ok(AdminOnly(identity))
    }
}

/// Optional authentication extractor.
///
/// Returns `None` instead of rejecting, for surfaces that answer both ways
/// (the session query endpoint).
pub struct OptionalAuth(pub Option<Identity>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(identity_from_parts(parts, state).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use axum::http::Request;

    fn identity(role: Role) -> Identity {
        Identity {
            id: "user_123".to_string(),
            email: "x@clinica.com".to_string(),
            name: "X".to_string(),
            role,
            specialty: None,
        }
    }

    fn parts_with_cookie(token: Option<&str>) -> Parts {
        let builder = Request::builder().uri("/test");
        let builder = match token {
            Some(token) => builder.header("Cookie", format!("{SESSION_COOKIE}={token}")),
            None => builder,
        };
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_requires_a_cookie() {
        let state = AppState::default();
        let mut parts = parts_with_cookie(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::SessionRequired)));
    }

    #[tokio::test]
    async fn auth_resolves_a_live_session() {
        let state = AppState::default();
        let token = state.sessions.create(&identity(Role::Student));
        let mut parts = parts_with_cookie(Some(&token));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.unwrap().0, identity(Role::Student));
    }

    #[tokio::test]
    async fn auth_rejects_unknown_tokens() {
        let state = AppState::default();
        let mut parts = parts_with_cookie(Some("stale-token"));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::SessionRequired)));
    }

    #[tokio::test]
    async fn auth_prefers_extensions() {
        let state = AppState::default();
        let mut parts = parts_with_cookie(None);
        parts.extensions.insert(identity(Role::Secretary));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.unwrap().0.role, Role::Secretary);
    }

    #[tokio::test]
    async fn admin_only_rejects_non_admins() {
        let state = AppState::default();
        let mut parts = parts_with_cookie(None);
        parts.extensions.insert(identity(Role::Student));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        match result {
            Err(AuthError::InsufficientRole { required, actual }) => {
                assert_eq!(required, vec![Role::Admin]);
                assert_eq!(actual, Role::Student);
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn admin_only_accepts_admins() {
        let state = AppState::default();
        let token = state.sessions.create(&identity(Role::Admin));
        let mut parts = parts_with_cookie(Some(&token));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn optional_auth_returns_none_without_session() {
        let state = AppState::default();
        let mut parts = parts_with_cookie(None);

        let OptionalAuth(found) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn revoked_sessions_stop_resolving() {
        let state = AppState::default();
        let token = state.sessions.create(&identity(Role::Patient));
        state.sessions.revoke(&token);

        let mut parts = parts_with_cookie(Some(&token));
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::SessionRequired)));
    }
}
