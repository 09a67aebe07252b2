// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Academic case workflow endpoints.
//!
//! Professors assign patient cases to students; students work and submit
//! them; professors grade or return them. Students see their own cases,
//! professors the ones they assigned, admins everything.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{Auth, Role},
    error::ApiError,
    models::{CaseAssignment, CreateCaseRequest, ReviewCaseRequest},
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
pub struct CaseQuery {
    pub student_id: Option<String>,
    pub professor_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/v1/academic/cases",
    params(CaseQuery),
    tag = "Academic",
    responses((status = 200, body = [CaseAssignment]))
)]
pub async fn list_cases(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Query(params): Query<CaseQuery>,
) -> Json<Vec<CaseAssignment>> {
    let store = state.store.read().await;
    let cases = match identity.role {
        Role::Student => store.list_cases(Some(&identity.id), None),
        Role::Professor => store.list_cases(None, Some(&identity.id)),
        _ => store.list_cases(params.student_id.as_deref(), params.professor_id.as_deref()),
    };
    Json(cases)
}

#[utoipa::path(
    post,
    path = "/v1/academic/cases",
    request_body = CreateCaseRequest,
    tag = "Academic",
    responses((status = 201, body = CaseAssignment), (status = 400), (status = 403), (status = 404))
)]
pub async fn create_case(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<CaseAssignment>), ApiError> {
    if !identity.role.reviews_cases() {
        return Err(ApiError::forbidden("Only professors may assign cases"));
    }
    let mut store = state.store.write().await;
    let case = store.create_case(request, &identity.id)?;
    Ok((StatusCode::CREATED, Json(case)))
}

#[utoipa::path(
    post,
    path = "/v1/academic/cases/{case_id}/submit",
    params(("case_id" = String, Path, description = "Case identifier")),
    tag = "Academic",
    responses((status = 200, body = CaseAssignment), (status = 403), (status = 404), (status = 422))
)]
pub async fn submit_case(
    Auth(identity): Auth,
    Path(case_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CaseAssignment>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.submit_case(&case_id, &identity.id)?))
}

#[utoipa::path(
    post,
    path = "/v1/academic/cases/{case_id}/review",
    params(("case_id" = String, Path, description = "Case identifier")),
    request_body = ReviewCaseRequest,
    tag = "Academic",
    responses((status = 200, body = CaseAssignment), (status = 400), (status = 403), (status = 404), (status = 422))
)]
pub async fn review_case(
    Auth(identity): Auth,
    Path(case_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<ReviewCaseRequest>,
) -> Result<Json<CaseAssignment>, ApiError> {
    if !identity.role.reviews_cases() {
        return Err(ApiError::forbidden("Only professors may review cases"));
    }
    let mut store = state.store.write().await;
    Ok(Json(store.review_case(&case_id, request)?))
}
