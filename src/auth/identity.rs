// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Authenticated identity representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// The authenticated user's profile.
///
/// This is the primary type used throughout the application to represent the
/// user making a request. An identity is issued at login, restored from the
/// session registry on subsequent requests, and destroyed at logout or
/// expiry. It is immutable for the lifetime of a session: account edits take
/// effect on the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Canonical account ID.
    pub id: String,

    /// Login email.
    pub email: String,

    /// Display name.
    pub name: String,

    /// The account's role.
    pub role: Role,

    /// Dental specialty, for professors and students on a specialty track.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl Identity {
    /// Check if this identity is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
