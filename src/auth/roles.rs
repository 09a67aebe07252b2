// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// Every account carries exactly one role, and route access is expressed as
/// sets of permitted roles in the route policy. The enum is closed on
/// purpose: adding a role forces every `match` over it to be revisited.
///
/// - `Patient` - books and views their own appointments
/// - `Student` - treats assigned patients, edits odontograms, submits cases
/// - `Professor` - assigns and reviews academic cases in their specialty
/// - `Admin` - full access, manages user accounts
/// - `Secretary` - front desk, manages patients and the appointment book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Clinic patient (self-service access only)
    Patient,
    /// Dental student under supervision
    Student,
    /// Supervising professor
    Professor,
    /// Full administrative access
    Admin,
    /// Front-desk secretary
    Secretary,
}

impl Role {
    /// Clinical staff roles: allowed to read patient records.
    pub const CLINICAL: &'static [Role] =
        &[Role::Student, Role::Professor, Role::Admin, Role::Secretary];

    /// Roles that take part in the academic case workflow.
    pub const ACADEMIC: &'static [Role] = &[Role::Student, Role::Professor, Role::Admin];

    /// Roles allowed to edit odontograms.
    pub const ODONTOGRAM: &'static [Role] = &[Role::Student, Role::Professor, Role::Admin];

    /// Whether this role may review and grade academic cases.
    pub fn reviews_cases(&self) -> bool {
        matches!(self, Role::Professor | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Student => write!(f, "student"),
            Role::Professor => write!(f, "professor"),
            Role::Admin => write!(f, "admin"),
            Role::Secretary => write!(f, "secretary"),
        }
    }
}
