// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! In-memory store for the clinic's working data.
//!
//! Patients, appointments, odontograms and academic cases live here, keyed
//! by UUID. The store owns all domain validation (lifecycle transitions,
//! FDI tooth numbers, referential checks against patients) so the HTTP
//! handlers stay thin.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::UserDirectory;
use crate::error::ApiError;
use crate::models::{
    Appointment, AppointmentStatus, CaseAssignment, CaseStatus, CreateAppointmentRequest,
    CreateCaseRequest, CreatePatientRequest, Odontogram, Patient, ReviewCaseRequest, ToothRecord,
    UpdateAppointmentRequest, UpdatePatientRequest, UpdateToothRequest, valid_fdi,
};

#[derive(Default)]
pub struct InMemoryStore {
    patients: HashMap<String, Patient>,
    appointments: HashMap<String, Appointment>,
    /// Keyed by patient ID; absence means a chart with no recorded teeth.
    odontograms: HashMap<String, Odontogram>,
    cases: HashMap<String, CaseAssignment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Patients
    // =========================================================================

    /// List patients, optionally filtered by a case-insensitive name search.
    pub fn list_patients(&self, query: Option<&str>) -> Vec<Patient> {
        let needle = query.map(str::to_lowercase);
        let mut patients: Vec<Patient> = self
            .patients
            .values()
            .filter(|patient| match &needle {
                Some(needle) => patient.name.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        patients.sort_by(|a, b| a.name.cmp(&b.name));
        patients
    }

    pub fn get_patient(&self, patient_id: &str) -> Result<Patient, ApiError> {
        self.patients
            .get(patient_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Patient not found"))
    }

    pub fn find_patient_by_email(&self, email: &str) -> Option<Patient> {
        self.patients
            .values()
            .find(|patient| patient.email.as_deref() == Some(email))
            .cloned()
    }

    pub fn create_patient(&mut self, request: CreatePatientRequest) -> Result<Patient, ApiError> {
        if request.name.trim().is_empty() {
            return Err(ApiError::bad_request("Patient name must not be empty"));
        }

        let id = Uuid::new_v4().to_string();
        let patient = Patient {
            id: id.clone(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            birth_date: request.birth_date,
            medical_history: request.medical_history,
            created_at: Utc::now(),
        };
        self.patients.insert(id, patient.clone());
        Ok(patient)
    }

    pub fn update_patient(
        &mut self,
        patient_id: &str,
        request: UpdatePatientRequest,
    ) -> Result<Patient, ApiError> {
        let Some(patient) = self.patients.get_mut(patient_id) else {
            return Err(ApiError::not_found("Patient not found"));
        };

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(ApiError::bad_request("Patient name must not be empty"));
            }
            patient.name = name;
        }
        if let Some(email) = request.email {
            patient.email = Some(email);
        }
        if let Some(phone) = request.phone {
            patient.phone = Some(phone);
        }
        if let Some(birth_date) = request.birth_date {
            patient.birth_date = Some(birth_date);
        }
        if let Some(history) = request.medical_history {
            patient.medical_history = Some(history);
        }
        Ok(patient.clone())
    }

    /// Delete a patient and everything hanging off the record.
    pub fn delete_patient(&mut self, patient_id: &str) -> Result<(), ApiError> {
        if self.patients.remove(patient_id).is_none() {
            return Err(ApiError::not_found("Patient not found"));
        }
        self.odontograms.remove(patient_id);
        self.appointments.retain(|_, a| a.patient_id != patient_id);
        self.cases.retain(|_, c| c.patient_id != patient_id);
        Ok(())
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    pub fn list_appointments(
        &self,
        patient_id: Option<&str>,
        dentist_id: Option<&str>,
        status: Option<AppointmentStatus>,
    ) -> Vec<Appointment> {
        let mut appointments: Vec<Appointment> = self
            .appointments
            .values()
            .filter(|a| patient_id.is_none_or(|id| a.patient_id == id))
            .filter(|a| dentist_id.is_none_or(|id| a.dentist_id == id))
            .filter(|a| status.is_none_or(|s| a.status == s))
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.scheduled_at);
        appointments
    }

    pub fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, ApiError> {
        self.appointments
            .get(appointment_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Appointment not found"))
    }

    pub fn create_appointment(
        &mut self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, ApiError> {
        if request.reason.trim().is_empty() {
            return Err(ApiError::bad_request("Appointment reason must not be empty"));
        }
        if !self.patients.contains_key(&request.patient_id) {
            return Err(ApiError::not_found("Patient not found"));
        }

        let id = Uuid::new_v4().to_string();
        let appointment = Appointment {
            id: id.clone(),
            patient_id: request.patient_id,
            dentist_id: request.dentist_id,
            scheduled_at: request.scheduled_at,
            reason: request.reason,
            status: AppointmentStatus::Scheduled,
            notes: None,
        };
        self.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }

    pub fn update_appointment(
        &mut self,
        appointment_id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, ApiError> {
        let Some(appointment) = self.appointments.get_mut(appointment_id) else {
            return Err(ApiError::not_found("Appointment not found"));
        };

        if let Some(status) = request.status {
            if !appointment.status.can_transition_to(status) {
                return Err(ApiError::unprocessable(format!(
                    "Appointment cannot move from {:?} to {:?}",
                    appointment.status, status
                )));
            }
            appointment.status = status;
        }
        if let Some(scheduled_at) = request.scheduled_at {
            appointment.scheduled_at = scheduled_at;
        }
        if let Some(reason) = request.reason {
            if reason.trim().is_empty() {
                return Err(ApiError::bad_request("Appointment reason must not be empty"));
            }
            appointment.reason = reason;
        }
        if let Some(notes) = request.notes {
            appointment.notes = Some(notes);
        }
        Ok(appointment.clone())
    }

    pub fn delete_appointment(&mut self, appointment_id: &str) -> Result<(), ApiError> {
        if self.appointments.remove(appointment_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Appointment not found"))
        }
    }

    // =========================================================================
    // Odontograms
    // =========================================================================

    /// A patient's tooth chart; a never-edited chart is empty, not missing.
    pub fn get_odontogram(&self, patient_id: &str) -> Result<Odontogram, ApiError> {
        let patient = self.get_patient(patient_id)?;
        Ok(self
            .odontograms
            .get(patient_id)
            .cloned()
            .unwrap_or_else(|| Odontogram {
                patient_id: patient.id,
                teeth: Vec::new(),
                updated_at: patient.created_at,
                updated_by: None,
            }))
    }

    pub fn replace_odontogram(
        &mut self,
        patient_id: &str,
        mut teeth: Vec<ToothRecord>,
        editor_id: &str,
    ) -> Result<Odontogram, ApiError> {
        self.get_patient(patient_id)?;
        validate_teeth(&teeth)?;

        teeth.sort_by_key(|tooth| tooth.number);
        let odontogram = Odontogram {
            patient_id: patient_id.to_string(),
            teeth,
            updated_at: Utc::now(),
            updated_by: Some(editor_id.to_string()),
        };
        self.odontograms.insert(patient_id.to_string(), odontogram.clone());
        Ok(odontogram)
    }

    pub fn upsert_tooth(
        &mut self,
        patient_id: &str,
        number: u8,
        request: UpdateToothRequest,
        editor_id: &str,
    ) -> Result<Odontogram, ApiError> {
        if !valid_fdi(number) {
            return Err(ApiError::bad_request(format!(
                "{number} is not a valid FDI tooth number"
            )));
        }

        let mut odontogram = self.get_odontogram(patient_id)?;
        let record = ToothRecord {
            number,
            condition: request.condition,
            notes: request.notes,
        };
        match odontogram.teeth.iter_mut().find(|t| t.number == number) {
            Some(tooth) => *tooth = record,
            None => odontogram.teeth.push(record),
        }
        odontogram.teeth.sort_by_key(|tooth| tooth.number);
        odontogram.updated_at = Utc::now();
        odontogram.updated_by = Some(editor_id.to_string());

        self.odontograms.insert(patient_id.to_string(), odontogram.clone());
        Ok(odontogram)
    }

    // =========================================================================
    // Academic cases
    // =========================================================================

    pub fn list_cases(
        &self,
        student_id: Option<&str>,
        professor_id: Option<&str>,
    ) -> Vec<CaseAssignment> {
        let mut cases: Vec<CaseAssignment> = self
            .cases
            .values()
            .filter(|c| student_id.is_none_or(|id| c.student_id == id))
            .filter(|c| professor_id.is_none_or(|id| c.professor_id == id))
            .cloned()
            .collect();
        cases.sort_by_key(|c| c.created_at);
        cases
    }

    pub fn get_case(&self, case_id: &str) -> Result<CaseAssignment, ApiError> {
        self.cases
            .get(case_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Case not found"))
    }

    pub fn create_case(
        &mut self,
        request: CreateCaseRequest,
        professor_id: &str,
    ) -> Result<CaseAssignment, ApiError> {
        if request.specialty.trim().is_empty() {
            return Err(ApiError::bad_request("Case specialty must not be empty"));
        }
        if !self.patients.contains_key(&request.patient_id) {
            return Err(ApiError::not_found("Patient not found"));
        }

        let id = Uuid::new_v4().to_string();
        let case = CaseAssignment {
            id: id.clone(),
            student_id: request.student_id,
            patient_id: request.patient_id,
            professor_id: professor_id.to_string(),
            specialty: request.specialty,
            status: CaseStatus::Assigned,
            grade: None,
            feedback: None,
            created_at: Utc::now(),
        };
        self.cases.insert(id, case.clone());
        Ok(case)
    }

    /// Student hands the case in for review.
    pub fn submit_case(
        &mut self,
        case_id: &str,
        student_id: &str,
    ) -> Result<CaseAssignment, ApiError> {
        let Some(case) = self.cases.get_mut(case_id) else {
            return Err(ApiError::not_found("Case not found"));
        };
        if case.student_id != student_id {
            return Err(ApiError::forbidden("Only the assigned student may submit this case"));
        }
        if !matches!(case.status, CaseStatus::Assigned | CaseStatus::Returned) {
            return Err(ApiError::unprocessable(format!(
                "Case cannot be submitted from {:?}",
                case.status
            )));
        }
        case.status = CaseStatus::Submitted;
        Ok(case.clone())
    }

    /// Professor grades an in-review case or sends it back.
    pub fn review_case(
        &mut self,
        case_id: &str,
        request: ReviewCaseRequest,
    ) -> Result<CaseAssignment, ApiError> {
        if let Some(grade) = request.grade {
            if !(0.0..=10.0).contains(&grade) {
                return Err(ApiError::bad_request("Grade must be between 0 and 10"));
            }
        }

        let Some(case) = self.cases.get_mut(case_id) else {
            return Err(ApiError::not_found("Case not found"));
        };
        if case.status != CaseStatus::Submitted {
            return Err(ApiError::unprocessable(format!(
                "Case cannot be reviewed from {:?}",
                case.status
            )));
        }

        if request.approved {
            case.status = CaseStatus::Approved;
            case.grade = request.grade;
        } else {
            case.status = CaseStatus::Returned;
        }
        case.feedback = request.feedback;
        Ok(case.clone())
    }

    // =========================================================================
    // Demo seed
    // =========================================================================

    /// Seed working data aligned with the demo accounts: the demo patient's
    /// clinical record, an upcoming appointment with the demo student, and
    /// an academic case under the demo professor.
    pub fn seed_demo(&mut self, directory: &UserDirectory) {
        let Ok(patient) = self.create_patient(CreatePatientRequest {
            name: "Juan Pérez".into(),
            email: Some("patient@clinica.com".into()),
            phone: Some("+52 55 1234 5678".into()),
            birth_date: None,
            medical_history: Some("No known allergies.".into()),
        }) else {
            return;
        };

        let student = directory.find_by_email("student@clinica.com");
        let professor = directory.find_by_email("professor@clinica.com");

        if let Some(student) = &student {
            let _ = self.create_appointment(CreateAppointmentRequest {
                patient_id: patient.id.clone(),
                dentist_id: student.id.clone(),
                scheduled_at: Utc::now() + chrono::Duration::days(7),
                reason: "Revisión general".into(),
            });
        }
        if let (Some(student), Some(professor)) = (&student, &professor) {
            let _ = self.create_case(
                CreateCaseRequest {
                    student_id: student.id.clone(),
                    patient_id: patient.id.clone(),
                    specialty: professor.specialty.clone().unwrap_or_else(|| "General".into()),
                },
                &professor.id,
            );
        }
    }
}

fn validate_teeth(teeth: &[ToothRecord]) -> Result<(), ApiError> {
    let mut seen = std::collections::HashSet::new();
    for tooth in teeth {
        if !valid_fdi(tooth.number) {
            return Err(ApiError::bad_request(format!(
                "{} is not a valid FDI tooth number",
                tooth.number
            )));
        }
        if !seen.insert(tooth.number) {
            return Err(ApiError::bad_request(format!(
                "Tooth {} appears more than once",
                tooth.number
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToothCondition;
    use axum::http::StatusCode;

    fn patient(store: &mut InMemoryStore, name: &str) -> Patient {
        store
            .create_patient(CreatePatientRequest {
                name: name.into(),
                email: None,
                phone: None,
                birth_date: None,
                medical_history: None,
            })
            .unwrap()
    }

    fn appointment(store: &mut InMemoryStore, patient_id: &str) -> Appointment {
        store
            .create_appointment(CreateAppointmentRequest {
                patient_id: patient_id.into(),
                dentist_id: "dentist_1".into(),
                scheduled_at: Utc::now(),
                reason: "Limpieza".into(),
            })
            .unwrap()
    }

    #[test]
    fn patient_name_search_is_case_insensitive() {
        let mut store = InMemoryStore::new();
        patient(&mut store, "Juan Pérez");
        patient(&mut store, "Ana Torres");

        let hits = store.list_patients(Some("juan"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Juan Pérez");
        assert_eq!(store.list_patients(None).len(), 2);
    }

    #[test]
    fn empty_patient_name_is_rejected() {
        let mut store = InMemoryStore::new();
        let err = store
            .create_patient(CreatePatientRequest {
                name: "   ".into(),
                email: None,
                phone: None,
                birth_date: None,
                medical_history: None,
            })
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn deleting_a_patient_cascades() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");
        let a = appointment(&mut store, &p.id);
        store
            .upsert_tooth(
                &p.id,
                11,
                UpdateToothRequest { condition: ToothCondition::Caries, notes: None },
                "editor",
            )
            .unwrap();

        store.delete_patient(&p.id).unwrap();
        assert_eq!(store.get_appointment(&a.id).unwrap_err().status, StatusCode::NOT_FOUND);
        assert_eq!(store.get_odontogram(&p.id).unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn appointment_requires_known_patient_and_reason() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");

        let err = store
            .create_appointment(CreateAppointmentRequest {
                patient_id: "missing".into(),
                dentist_id: "d".into(),
                scheduled_at: Utc::now(),
                reason: "Limpieza".into(),
            })
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = store
            .create_appointment(CreateAppointmentRequest {
                patient_id: p.id,
                dentist_id: "d".into(),
                scheduled_at: Utc::now(),
                reason: "  ".into(),
            })
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn appointment_status_transitions_are_enforced() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");
        let a = appointment(&mut store, &p.id);

        // scheduled → completed skips confirmation
        let err = store
            .update_appointment(
                &a.id,
                UpdateAppointmentRequest {
                    status: Some(AppointmentStatus::Completed),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let confirmed = store
            .update_appointment(
                &a.id,
                UpdateAppointmentRequest {
                    status: Some(AppointmentStatus::Confirmed),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

        let completed = store
            .update_appointment(
                &a.id,
                UpdateAppointmentRequest {
                    status: Some(AppointmentStatus::Completed),
                    notes: Some("Sin complicaciones".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(completed.status, AppointmentStatus::Completed);
        assert_eq!(completed.notes.as_deref(), Some("Sin complicaciones"));
    }

    #[test]
    fn appointment_filters_compose() {
        let mut store = InMemoryStore::new();
        let p1 = patient(&mut store, "Juan Pérez");
        let p2 = patient(&mut store, "Ana Torres");
        appointment(&mut store, &p1.id);
        appointment(&mut store, &p1.id);
        appointment(&mut store, &p2.id);

        assert_eq!(store.list_appointments(Some(&p1.id), None, None).len(), 2);
        assert_eq!(store.list_appointments(Some(&p2.id), None, None).len(), 1);
        assert_eq!(
            store
                .list_appointments(None, None, Some(AppointmentStatus::Cancelled))
                .len(),
            0
        );
        assert_eq!(store.list_appointments(None, Some("dentist_1"), None).len(), 3);
    }

    #[test]
    fn never_edited_odontogram_is_empty_not_missing() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");

        let chart = store.get_odontogram(&p.id).unwrap();
        assert!(chart.teeth.is_empty());
        assert_eq!(chart.updated_by, None);

        let err = store.get_odontogram("missing").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn replace_odontogram_validates_fdi_numbers() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");

        let err = store
            .replace_odontogram(
                &p.id,
                vec![ToothRecord { number: 19, condition: ToothCondition::Caries, notes: None }],
                "editor",
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = store
            .replace_odontogram(
                &p.id,
                vec![
                    ToothRecord { number: 11, condition: ToothCondition::Caries, notes: None },
                    ToothRecord { number: 11, condition: ToothCondition::Filled, notes: None },
                ],
                "editor",
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let chart = store
            .replace_odontogram(
                &p.id,
                vec![
                    ToothRecord { number: 21, condition: ToothCondition::Filled, notes: None },
                    ToothRecord { number: 11, condition: ToothCondition::Caries, notes: None },
                ],
                "editor",
            )
            .unwrap();
        // Stored sorted by tooth number.
        assert_eq!(chart.teeth[0].number, 11);
        assert_eq!(chart.updated_by.as_deref(), Some("editor"));
    }

    #[test]
    fn upsert_tooth_updates_in_place() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");

        store
            .upsert_tooth(
                &p.id,
                11,
                UpdateToothRequest { condition: ToothCondition::Caries, notes: None },
                "editor_a",
            )
            .unwrap();
        let chart = store
            .upsert_tooth(
                &p.id,
                11,
                UpdateToothRequest {
                    condition: ToothCondition::Filled,
                    notes: Some("Resina".into()),
                },
                "editor_b",
            )
            .unwrap();

        assert_eq!(chart.teeth.len(), 1);
        assert_eq!(chart.teeth[0].condition, ToothCondition::Filled);
        assert_eq!(chart.updated_by.as_deref(), Some("editor_b"));

        let err = store
            .upsert_tooth(
                &p.id,
                10,
                UpdateToothRequest { condition: ToothCondition::Healthy, notes: None },
                "editor",
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn case_submission_is_limited_to_the_assigned_student() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");
        let case = store
            .create_case(
                CreateCaseRequest {
                    student_id: "student_1".into(),
                    patient_id: p.id,
                    specialty: "Endodoncia".into(),
                },
                "professor_1",
            )
            .unwrap();
        assert_eq!(case.status, CaseStatus::Assigned);

        let err = store.submit_case(&case.id, "someone_else").unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let submitted = store.submit_case(&case.id, "student_1").unwrap();
        assert_eq!(submitted.status, CaseStatus::Submitted);

        // Already submitted; a second submission is rejected.
        let err = store.submit_case(&case.id, "student_1").unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn returned_cases_can_be_resubmitted_and_approved() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");
        let case = store
            .create_case(
                CreateCaseRequest {
                    student_id: "student_1".into(),
                    patient_id: p.id,
                    specialty: "Endodoncia".into(),
                },
                "professor_1",
            )
            .unwrap();

        store.submit_case(&case.id, "student_1").unwrap();
        let returned = store
            .review_case(
                &case.id,
                ReviewCaseRequest {
                    approved: false,
                    grade: None,
                    feedback: Some("Falta radiografía".into()),
                },
            )
            .unwrap();
        assert_eq!(returned.status, CaseStatus::Returned);
        assert_eq!(returned.feedback.as_deref(), Some("Falta radiografía"));

        store.submit_case(&case.id, "student_1").unwrap();
        let approved = store
            .review_case(
                &case.id,
                ReviewCaseRequest { approved: true, grade: Some(9.0), feedback: None },
            )
            .unwrap();
        assert_eq!(approved.status, CaseStatus::Approved);
        assert_eq!(approved.grade, Some(9.0));
    }

    #[test]
    fn review_validates_state_and_grade() {
        let mut store = InMemoryStore::new();
        let p = patient(&mut store, "Juan Pérez");
        let case = store
            .create_case(
                CreateCaseRequest {
                    student_id: "student_1".into(),
                    patient_id: p.id,
                    specialty: "Endodoncia".into(),
                },
                "professor_1",
            )
            .unwrap();

        // Not submitted yet.
        let err = store
            .review_case(&case.id, ReviewCaseRequest { approved: true, grade: None, feedback: None })
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        store.submit_case(&case.id, "student_1").unwrap();
        let err = store
            .review_case(
                &case.id,
                ReviewCaseRequest { approved: true, grade: Some(11.0), feedback: None },
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn demo_seed_links_accounts_to_working_data() {
        let directory = UserDirectory::with_demo_accounts();
        let mut store = InMemoryStore::new();
        store.seed_demo(&directory);

        let patient = store.find_patient_by_email("patient@clinica.com").unwrap();
        assert_eq!(store.list_appointments(Some(&patient.id), None, None).len(), 1);

        let student = directory.find_by_email("student@clinica.com").unwrap();
        assert_eq!(store.list_cases(Some(&student.id), None).len(), 1);
    }
}
