// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Patients**: clinical records for people treated at the clinic
//! - **Appointments**: the clinic's bookings, with a status lifecycle
//! - **Odontograms**: per-patient tooth charts in adult FDI notation
//! - **Academic cases**: patient cases assigned to students for review
//! - **Accounts**: requests against the user directory

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// Patient Models
// =============================================================================

/// A patient's clinical record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Patient {
    /// Unique identifier for this patient.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email; links the record to a portal account when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Free-form medical history notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Request to create a patient record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub medical_history: Option<String>,
}

/// Request to update a patient record. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePatientRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub medical_history: Option<String>,
}

// =============================================================================
// Appointment Models
// =============================================================================

/// Appointment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Legal lifecycle moves: `scheduled → confirmed → completed`, with
    /// cancellation possible until the visit happened.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            AppointmentStatus::Scheduled => {
                matches!(next, AppointmentStatus::Confirmed | AppointmentStatus::Cancelled)
            }
            AppointmentStatus::Confirmed => {
                matches!(next, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
            }
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => false,
        }
    }
}

/// A clinic appointment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Appointment {
    /// Unique identifier for this appointment.
    pub id: String,
    /// The patient being seen.
    pub patient_id: String,
    /// Account ID of the treating student or professor.
    pub dentist_id: String,
    /// When the visit is scheduled.
    pub scheduled_at: DateTime<Utc>,
    /// Reason for the visit.
    pub reason: String,
    /// Lifecycle state.
    pub status: AppointmentStatus,
    /// Clinical notes added along the way.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request to book an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    pub patient_id: String,
    pub dentist_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub reason: String,
}

/// Request to update an appointment. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAppointmentRequest {
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Odontogram Models
// =============================================================================

/// Condition recorded for a single tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToothCondition {
    Healthy,
    Caries,
    Filled,
    Crown,
    RootCanal,
    Extracted,
    Implant,
}

/// One tooth entry in an odontogram.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ToothRecord {
    /// Adult FDI tooth number (11-18, 21-28, 31-38, 41-48).
    pub number: u8,
    pub condition: ToothCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Whether `number` is a valid adult FDI tooth number.
pub fn valid_fdi(number: u8) -> bool {
    matches!(number, 11..=18 | 21..=28 | 31..=38 | 41..=48)
}

/// A patient's tooth chart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Odontogram {
    /// The patient this chart belongs to.
    pub patient_id: String,
    /// Recorded teeth; unrecorded teeth are implicitly healthy.
    pub teeth: Vec<ToothRecord>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Account ID of the last editor; absent for a never-edited chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Request to replace a patient's tooth chart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOdontogramRequest {
    pub teeth: Vec<ToothRecord>,
}

/// Request to upsert a single tooth entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateToothRequest {
    pub condition: ToothCondition,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Academic Case Models
// =============================================================================

/// Academic case lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Assigned to a student, work in progress.
    Assigned,
    /// Submitted by the student, awaiting review.
    Submitted,
    /// Accepted and graded by a professor.
    Approved,
    /// Sent back to the student with feedback.
    Returned,
}

/// A patient case assigned to a student for academic credit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CaseAssignment {
    /// Unique identifier for this case.
    pub id: String,
    /// The student working the case.
    pub student_id: String,
    /// The patient under treatment.
    pub patient_id: String,
    /// The professor who assigned (and will review) the case.
    pub professor_id: String,
    /// Specialty the case counts toward.
    pub specialty: String,
    /// Lifecycle state.
    pub status: CaseStatus,
    /// Grade assigned at approval, 0-10 scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<f32>,
    /// Reviewer feedback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// When the case was assigned.
    pub created_at: DateTime<Utc>,
}

/// Request to assign a case to a student.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCaseRequest {
    pub student_id: String,
    pub patient_id: String,
    pub specialty: String,
}

/// Professor's review of a submitted case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewCaseRequest {
    /// Approve (true) or return to the student (false).
    pub approved: bool,
    #[serde(default)]
    pub grade: Option<f32>,
    #[serde(default)]
    pub feedback: Option<String>,
}

// =============================================================================
// Account Models
// =============================================================================

/// Self-service registration; the resulting account is a patient.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Admin request to create an account with an explicit role.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub specialty: Option<String>,
}

/// Admin request to update an account. Absent fields are left unchanged;
/// an empty `specialty` string clears the specialty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_lifecycle_moves() {
        use AppointmentStatus::*;
        assert!(Scheduled.can_transition_to(Confirmed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Scheduled.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Confirmed));
        assert!(!Cancelled.can_transition_to(Scheduled));
        // Writing the current status back is always fine.
        assert!(Completed.can_transition_to(Completed));
    }

    #[test]
    fn fdi_numbering_accepts_adult_quadrants_only() {
        for valid in [11, 18, 21, 28, 31, 38, 41, 48] {
            assert!(valid_fdi(valid), "{valid} is a valid FDI number");
        }
        for invalid in [0, 1, 10, 19, 20, 29, 30, 39, 40, 49, 50, 85] {
            assert!(!valid_fdi(invalid), "{invalid} is not a valid FDI number");
        }
    }

    #[test]
    fn status_names_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&AppointmentStatus::Scheduled).unwrap(), r#""scheduled""#);
        assert_eq!(serde_json::to_string(&CaseStatus::Returned).unwrap(), r#""returned""#);
        assert_eq!(serde_json::to_string(&ToothCondition::RootCanal).unwrap(), r#""root_canal""#);
    }
}
