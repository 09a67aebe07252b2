// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Edge gate decision function.
//!
//! The first, coarse filter on every navigation: it sees only the requested
//! path and whether a session cookie is present - never the cookie's
//! content, so it cannot (and does not try to) enforce roles. Role policy is
//! the guard layer's job; this layer exists to bounce obviously
//! unauthenticated navigation before any handler work happens.

use super::policy::RoutePolicy;

/// Outcome of the edge gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Let the request through.
    Proceed,
    /// No cookie on a protected path: go log in, then come back.
    RedirectToLogin { return_to: String },
    /// A logged-in navigation to login/register: go to the landing page.
    RedirectToLanding,
}

/// Evaluate the gate for `path`.
pub fn evaluate(path: &str, has_session_cookie: bool, policy: &RoutePolicy) -> EdgeDecision {
    if policy.is_auth_page(path) && has_session_cookie {
        return EdgeDecision::RedirectToLanding;
    }
    if policy.is_public(path) {
        return EdgeDecision::Proceed;
    }
    if !has_session_cookie {
        return EdgeDecision::RedirectToLogin {
            return_to: path.to_string(),
        };
    }
    EdgeDecision::Proceed
}
