// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Patient record endpoints. Access is clinical-staff-only via the route
//! policy; handlers assume the guard already ran.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{CreatePatientRequest, Patient, UpdatePatientRequest},
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
pub struct PatientQuery {
    /// Case-insensitive name search.
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/v1/patients",
    params(PatientQuery),
    tag = "Patients",
    responses((status = 200, body = [Patient]))
)]
pub async fn list_patients(
    State(state): State<AppState>,
    Query(params): Query<PatientQuery>,
) -> Json<Vec<Patient>> {
    let store = state.store.read().await;
    Json(store.list_patients(params.q.as_deref()))
}

#[utoipa::path(
    get,
    path = "/v1/patients/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier")),
    tag = "Patients",
    responses((status = 200, body = Patient), (status = 404))
)]
pub async fn get_patient(
    Path(patient_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Patient>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_patient(&patient_id)?))
}

#[utoipa::path(
    post,
    path = "/v1/patients",
    request_body = CreatePatientRequest,
    tag = "Patients",
    responses((status = 201, body = Patient), (status = 400))
)]
pub async fn create_patient(
    State(state): State<AppState>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let mut store = state.store.write().await;
    let patient = store.create_patient(request)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    put,
    path = "/v1/patients/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier")),
    request_body = UpdatePatientRequest,
    tag = "Patients",
    responses((status = 200, body = Patient), (status = 404))
)]
pub async fn update_patient(
    Path(patient_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Patient>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_patient(&patient_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/patients/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier")),
    tag = "Patients",
    responses((status = 204), (status = 404))
)]
pub async fn delete_patient(
    Path(patient_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_patient(&patient_id)?;
    Ok(StatusCode::NO_CONTENT)
}
