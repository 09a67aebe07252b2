// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Route guard decision function.
//!
//! Pure function over explicit inputs so it can be tested without mounting
//! any HTTP machinery. The server's guard middleware calls it with
//! `initialized = true`; `Wait` exists for consumers sitting on top of a
//! still-loading [`SessionContext`](super::SessionContext).

use crate::auth::{Identity, Role};

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity is still unknown; render nothing and take no action.
    Wait,
    /// Render the protected content.
    Allow,
    /// Nobody is logged in; redirect to login, preserving the target path.
    DenyNoIdentity,
    /// Logged in with a role outside the required set; send to that role's
    /// landing page with an access-denied explanation.
    DenyWrongRole,
}

/// Decide whether `identity` may enter a route requiring `required_roles`.
///
/// An empty role set means any authenticated identity is acceptable.
pub fn decide(
    required_roles: &[Role],
    identity: Option<&Identity>,
    initialized: bool,
) -> GuardDecision {
    if !initialized {
        return GuardDecision::Wait;
    }
    let Some(identity) = identity else {
        return GuardDecision::DenyNoIdentity;
    };
    if !required_roles.is_empty() && !required_roles.contains(&identity.role) {
        return GuardDecision::DenyWrongRole;
    }
    GuardDecision::Allow
}
