// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Odontogram endpoints. The route policy limits these to students,
//! professors and admins.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Odontogram, UpdateOdontogramRequest, UpdateToothRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/odontograms/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier")),
    tag = "Odontograms",
    responses((status = 200, body = Odontogram), (status = 404))
)]
pub async fn get_odontogram(
    Path(patient_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Odontogram>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_odontogram(&patient_id)?))
}

#[utoipa::path(
    put,
    path = "/v1/odontograms/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier")),
    request_body = UpdateOdontogramRequest,
    tag = "Odontograms",
    responses((status = 200, body = Odontogram), (status = 400), (status = 404))
)]
pub async fn replace_odontogram(
    Auth(identity): Auth,
    Path(patient_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateOdontogramRequest>,
) -> Result<Json<Odontogram>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.replace_odontogram(&patient_id, request.teeth, &identity.id)?))
}

#[utoipa::path(
    put,
    path = "/v1/odontograms/{patient_id}/teeth/{number}",
    params(
        ("patient_id" = String, Path, description = "Patient identifier"),
        ("number" = u8, Path, description = "Adult FDI tooth number")
    ),
    request_body = UpdateToothRequest,
    tag = "Odontograms",
    responses((status = 200, body = Odontogram), (status = 400), (status = 404))
)]
pub async fn update_tooth(
    Auth(identity): Auth,
    Path((patient_id, number)): Path<(String, u8)>,
    State(state): State<AppState>,
    Json(request): Json<UpdateToothRequest>,
) -> Result<Json<Odontogram>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.upsert_tooth(&patient_id, number, request, &identity.id)?))
}
