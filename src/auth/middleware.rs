// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Request gating middleware.
//!
//! Two layers, applied outermost-first:
//!
//! 1. [`edge_gate`] - the coarse filter. Sees only the path and whether the
//!    session cookie is present; bounces obviously unauthenticated
//!    navigation to login and logged-in visits to login/register back to the
//!    portal. It never decodes the cookie.
//! 2. [`route_guard`] - the real check. Resolves the cookie through the
//!    session registry and applies the role policy via
//!    [`guard::decide`](crate::session::guard::decide) before any handler
//!    runs. Allowed requests carry the resolved [`Identity`] in their
//!    extensions for extractors to pick up.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::config::SESSION_COOKIE;
use crate::session::{gate, guard, EdgeDecision, GuardDecision, RoutePolicy};
use crate::state::AppState;

use super::AuthError;

fn login_redirect(return_to: &str) -> Response {
    Redirect::temporary(&format!("{}?return_to={return_to}", RoutePolicy::LOGIN_PATH))
        .into_response()
}

/// Cookie-presence filter, run before everything else.
pub async fn edge_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let has_cookie = CookieJar::from_headers(request.headers())
        .get(SESSION_COOKIE)
        .is_some();

    match gate::evaluate(&path, has_cookie, &state.policy) {
        EdgeDecision::Proceed => next.run(request).await,
        EdgeDecision::RedirectToLogin { return_to } => login_redirect(&return_to),
        EdgeDecision::RedirectToLanding => {
            Redirect::temporary(RoutePolicy::FALLBACK_LANDING).into_response()
        }
    }
}

/// Session resolution and role policy enforcement.
pub async fn route_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if state.policy.is_public(&path) {
        return next.run(request).await;
    }

    let identity = CookieJar::from_headers(request.headers())
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.resolve(cookie.value()));
    let required = state.policy.required_roles(&path);

    // The registry is live from startup, so identity resolution is always
    // initialized here; Wait only concerns context-based consumers.
    match guard::decide(required, identity.as_ref(), true) {
        GuardDecision::Allow => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        GuardDecision::DenyNoIdentity => {
            tracing::debug!(%path, "unauthenticated request bounced to login");
            login_redirect(&path)
        }
        GuardDecision::DenyWrongRole => {
            let actual = identity.map(|i| i.role);
            tracing::warn!(%path, ?actual, "role denied on guarded route");
            match actual {
                Some(actual) => AuthError::InsufficientRole {
                    required: required.to_vec(),
                    actual,
                }
                .into_response(),
                None => login_redirect(&path),
            }
        }
        GuardDecision::Wait => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
