// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Route access policy.
//!
//! The one authoritative mapping from route prefixes to permitted roles,
//! consumed by both the edge gate and the guard middleware. Landing pages
//! per role live here too, so no other module carries its own copy of
//! either table.

use crate::auth::Role;

/// Who may enter a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// No identity required.
    Public,
    /// Any authenticated identity.
    Authenticated,
    /// Only the listed roles.
    Roles(Vec<Role>),
}

#[derive(Debug, Clone)]
struct RouteRule {
    prefix: String,
    access: RouteAccess,
}

/// Prefix-matched route policy.
///
/// Matching is segment-aware: `/v1/patients` covers `/v1/patients/42` but
/// not `/v1/patientsx`. Nested routes inherit their ancestor's rule unless a
/// longer prefix overrides it, and a path no rule covers requires an
/// authenticated identity.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    rules: Vec<RouteRule>,
    auth_pages: Vec<String>,
}

/// Builder for [`RoutePolicy`].
#[derive(Debug, Default)]
pub struct RoutePolicyBuilder {
    rules: Vec<RouteRule>,
    auth_pages: Vec<String>,
}

impl RoutePolicyBuilder {
    /// Reachable without a session.
    pub fn public(mut self, prefix: &str) -> Self {
        self.rules.push(RouteRule {
            prefix: prefix.to_string(),
            access: RouteAccess::Public,
        });
        self
    }

    /// A login/register surface: public, but pointless for an active
    /// session, so the edge gate bounces those to the landing page.
    pub fn auth_page(self, prefix: &str) -> Self {
        let mut builder = self.public(prefix);
        builder.auth_pages.push(prefix.to_string());
        builder
    }

    /// Requires a session but no particular role.
    pub fn authenticated(mut self, prefix: &str) -> Self {
        self.rules.push(RouteRule {
            prefix: prefix.to_string(),
            access: RouteAccess::Authenticated,
        });
        self
    }

    /// Requires one of the listed roles.
    pub fn allow(mut self, prefix: &str, roles: &[Role]) -> Self {
        self.rules.push(RouteRule {
            prefix: prefix.to_string(),
            access: RouteAccess::Roles(roles.to_vec()),
        });
        self
    }

    pub fn build(self) -> RoutePolicy {
        RoutePolicy {
            rules: self.rules,
            auth_pages: self.auth_pages,
        }
    }
}

fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// Applied when no rule matches: a session is required, any role passes.
static DEFAULT_ACCESS: RouteAccess = RouteAccess::Authenticated;

impl RoutePolicy {
    pub fn builder() -> RoutePolicyBuilder {
        RoutePolicyBuilder::default()
    }

    /// The portal's route table.
    pub fn portal() -> Self {
        Self::builder()
            .auth_page("/v1/auth/login")
            .auth_page("/v1/auth/register")
            .public("/v1/auth")
            .authenticated("/v1/auth/me")
            .public("/health")
            .public("/docs")
            .public("/api-doc")
            .authenticated("/v1/appointments")
            .allow("/v1/patients", Role::CLINICAL)
            .allow("/v1/odontograms", Role::ODONTOGRAM)
            .allow("/v1/academic", Role::ACADEMIC)
            .allow("/v1/users", &[Role::Admin])
            .build()
    }

    /// Longest matching prefix wins; unmatched paths require a session.
    pub fn access_for(&self, path: &str) -> &RouteAccess {
        self.rules
            .iter()
            .filter(|rule| prefix_matches(&rule.prefix, path))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| &rule.access)
            .unwrap_or(&DEFAULT_ACCESS)
    }

    pub fn is_public(&self, path: &str) -> bool {
        *self.access_for(path) == RouteAccess::Public
    }

    pub fn is_auth_page(&self, path: &str) -> bool {
        self.auth_pages.iter().any(|p| prefix_matches(p, path))
    }

    /// Roles required on `path`; empty means any authenticated identity.
    pub fn required_roles(&self, path: &str) -> &[Role] {
        match self.access_for(path) {
            RouteAccess::Roles(roles) => roles,
            RouteAccess::Public | RouteAccess::Authenticated => &[],
        }
    }

    /// Where `role` lands after login or when bounced off a denied route.
    pub fn default_landing(role: Role) -> &'static str {
        match role {
            Role::Patient => "/v1/appointments",
            Role::Student => "/v1/patients",
            Role::Professor => "/v1/academic/cases",
            Role::Admin => "/v1/users",
            Role::Secretary => "/v1/appointments",
        }
    }

    /// Landing page when the role is unknown (the edge gate never decodes
    /// the cookie, so it cannot pick a per-role page).
    pub const FALLBACK_LANDING: &'static str = "/v1/appointments";

    /// The login surface, target of unauthenticated redirects.
    pub const LOGIN_PATH: &'static str = "/v1/auth/login";
}
