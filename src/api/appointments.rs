// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Appointment endpoints.
//!
//! Any authenticated identity may use these routes; patients are scoped to
//! the appointments of their own clinical record (linked by email), staff
//! see the whole book.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{Auth, Identity, Role},
    error::ApiError,
    models::{Appointment, AppointmentStatus, CreateAppointmentRequest, Patient, UpdateAppointmentRequest},
    state::AppState,
    store::InMemoryStore,
};

#[derive(Deserialize, IntoParams)]
pub struct AppointmentQuery {
    pub patient_id: Option<String>,
    pub dentist_id: Option<String>,
    pub status: Option<AppointmentStatus>,
}

/// The patient record linked to a patient login, if any.
fn linked_patient(store: &InMemoryStore, identity: &Identity) -> Option<Patient> {
    store.find_patient_by_email(&identity.email)
}

/// Patients may only touch appointments of their own record.
fn check_ownership(
    store: &InMemoryStore,
    identity: &Identity,
    appointment: &Appointment,
) -> Result<(), ApiError> {
    if identity.role != Role::Patient {
        return Ok(());
    }
    match linked_patient(store, identity) {
        Some(own) if own.id == appointment.patient_id => Ok(()),
        _ => Err(ApiError::forbidden("This appointment belongs to another patient")),
    }
}

#[utoipa::path(
    get,
    path = "/v1/appointments",
    params(AppointmentQuery),
    tag = "Appointments",
    responses((status = 200, body = [Appointment]))
)]
pub async fn list_appointments(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Query(params): Query<AppointmentQuery>,
) -> Json<Vec<Appointment>> {
    let store = state.store.read().await;
    let appointments = if identity.role == Role::Patient {
        match linked_patient(&store, &identity) {
            Some(own) => store.list_appointments(Some(&own.id), None, params.status),
            None => Vec::new(),
        }
    } else {
        store.list_appointments(
            params.patient_id.as_deref(),
            params.dentist_id.as_deref(),
            params.status,
        )
    };
    Json(appointments)
}

#[utoipa::path(
    get,
    path = "/v1/appointments/{appointment_id}",
    params(("appointment_id" = String, Path, description = "Appointment identifier")),
    tag = "Appointments",
    responses((status = 200, body = Appointment), (status = 403), (status = 404))
)]
pub async fn get_appointment(
    Auth(identity): Auth,
    Path(appointment_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Appointment>, ApiError> {
    let store = state.store.read().await;
    let appointment = store.get_appointment(&appointment_id)?;
    check_ownership(&store, &identity, &appointment)?;
    Ok(Json(appointment))
}

#[utoipa::path(
    post,
    path = "/v1/appointments",
    request_body = CreateAppointmentRequest,
    tag = "Appointments",
    responses((status = 201, body = Appointment), (status = 400), (status = 404))
)]
pub async fn create_appointment(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Json(mut request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let mut store = state.store.write().await;

    if identity.role == Role::Patient {
        // Patients book for themselves, whatever the request claimed.
        let own = linked_patient(&store, &identity).ok_or_else(|| {
            ApiError::not_found("No patient record is linked to this account")
        })?;
        request.patient_id = own.id;
    }

    let appointment = store.create_appointment(request)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    put,
    path = "/v1/appointments/{appointment_id}",
    params(("appointment_id" = String, Path, description = "Appointment identifier")),
    request_body = UpdateAppointmentRequest,
    tag = "Appointments",
    responses((status = 200, body = Appointment), (status = 403), (status = 404), (status = 422))
)]
pub async fn update_appointment(
    Auth(identity): Auth,
    Path(appointment_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let mut store = state.store.write().await;
    let existing = store.get_appointment(&appointment_id)?;
    check_ownership(&store, &identity, &existing)?;
    Ok(Json(store.update_appointment(&appointment_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/appointments/{appointment_id}",
    params(("appointment_id" = String, Path, description = "Appointment identifier")),
    tag = "Appointments",
    responses((status = 204), (status = 403), (status = 404))
)]
pub async fn delete_appointment(
    Auth(identity): Auth,
    Path(appointment_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    let existing = store.get_appointment(&appointment_id)?;
    check_ownership(&store, &identity, &existing)?;
    store.delete_appointment(&appointment_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn empty_query() -> Query<AppointmentQuery> {
        Query(AppointmentQuery {
            patient_id: None,
            dentist_id: None,
            status: None,
        })
    }

    fn demo_identity(state: &AppState, email: &str) -> Identity {
        state
            .users
            .find_by_email(email)
            .expect("demo account exists")
    }

    async fn other_patients_appointment(state: &AppState) -> Appointment {
        let mut store = state.store.write().await;
        let other = store
            .create_patient(crate::models::CreatePatientRequest {
                name: "Otro Paciente".into(),
                email: None,
                phone: None,
                birth_date: None,
                medical_history: None,
            })
            .unwrap();
        store
            .create_appointment(CreateAppointmentRequest {
                patient_id: other.id,
                dentist_id: "dentist_x".into(),
                scheduled_at: Utc::now(),
                reason: "Extracción".into(),
            })
            .unwrap()
    }

    #[tokio::test]
    async fn patients_only_see_their_own_appointments() {
        let state = AppState::default();
        other_patients_appointment(&state).await;

        let patient = demo_identity(&state, "patient@clinica.com");
        let Json(own) = list_appointments(Auth(patient), State(state.clone()), empty_query()).await;
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].reason, "Revisión general");

        let secretary = demo_identity(&state, "secretary@clinica.com");
        let Json(all) = list_appointments(Auth(secretary), State(state), empty_query()).await;
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn patient_booking_is_forced_onto_their_own_record() {
        let state = AppState::default();
        let patient = demo_identity(&state, "patient@clinica.com");
        let own_record = {
            let store = state.store.read().await;
            store.find_patient_by_email("patient@clinica.com").unwrap()
        };

        let (status, Json(appointment)) = create_appointment(
            Auth(patient),
            State(state),
            Json(CreateAppointmentRequest {
                patient_id: "someone-else".into(),
                dentist_id: "dentist_x".into(),
                scheduled_at: Utc::now(),
                reason: "Dolor de muela".into(),
            }),
        )
        .await
        .expect("patient books an appointment");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(appointment.patient_id, own_record.id);
    }

    #[tokio::test]
    async fn patients_cannot_touch_other_records() {
        let state = AppState::default();
        let foreign = other_patients_appointment(&state).await;
        let patient = demo_identity(&state, "patient@clinica.com");

        let err = get_appointment(
            Auth(patient.clone()),
            Path(foreign.id.clone()),
            State(state.clone()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let err = delete_appointment(Auth(patient), Path(foreign.id), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn staff_update_runs_the_lifecycle() {
        let state = AppState::default();
        let secretary = demo_identity(&state, "secretary@clinica.com");
        let appointment = other_patients_appointment(&state).await;

        let Json(confirmed) = update_appointment(
            Auth(secretary.clone()),
            Path(appointment.id.clone()),
            State(state.clone()),
            Json(UpdateAppointmentRequest {
                status: Some(AppointmentStatus::Confirmed),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

        let err = update_appointment(
            Auth(secretary),
            Path(appointment.id),
            State(state),
            Json(UpdateAppointmentRequest {
                status: Some(AppointmentStatus::Scheduled),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
