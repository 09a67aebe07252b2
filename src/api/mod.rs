// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{
        identity::Identity,
        middleware::{edge_gate, route_guard},
        roles::Role,
    },
    models::{
        Appointment, AppointmentStatus, CaseAssignment, CaseStatus, CreateAppointmentRequest,
        CreateCaseRequest, CreatePatientRequest, CreateUserRequest, Odontogram, Patient,
        RegisterRequest, ReviewCaseRequest, ToothCondition, ToothRecord, UpdateAppointmentRequest,
        UpdateOdontogramRequest, UpdatePatientRequest, UpdateToothRequest, UpdateUserRequest,
    },
    state::AppState,
};

pub mod academic;
pub mod appointments;
pub mod auth;
pub mod health;
pub mod odontograms;
pub mod patients;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        .route("/auth/me", get(auth::me))
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/{patient_id}",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/odontograms/{patient_id}",
            get(odontograms::get_odontogram).put(odontograms::replace_odontogram),
        )
        .route(
            "/odontograms/{patient_id}/teeth/{number}",
            put(odontograms::update_tooth),
        )
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/appointments/{appointment_id}",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route(
            "/academic/cases",
            get(academic::list_cases).post(academic::create_case),
        )
        .route("/academic/cases/{case_id}/submit", post(academic::submit_case))
        .route("/academic/cases/{case_id}/review", post(academic::review_case))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{user_id}",
            put(users::update_user).delete(users::delete_user),
        )
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state.clone());

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Innermost gate resolves identity and applies role policy; the edge
        // gate in front of it sees only cookie presence.
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .layer(middleware::from_fn_with_state(state, edge_gate))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::register,
        auth::logout,
        auth::session,
        auth::me,
        health::health,
        health::liveness,
        health::readiness,
        patients::list_patients,
        patients::get_patient,
        patients::create_patient,
        patients::update_patient,
        patients::delete_patient,
        odontograms::get_odontogram,
        odontograms::replace_odontogram,
        odontograms::update_tooth,
        appointments::list_appointments,
        appointments::get_appointment,
        appointments::create_appointment,
        appointments::update_appointment,
        appointments::delete_appointment,
        academic::list_cases,
        academic::create_case,
        academic::submit_case,
        academic::review_case,
        users::list_users,
        users::create_user,
        users::update_user,
        users::delete_user
    ),
    components(
        schemas(
            Identity,
            Role,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::SessionResponse,
            RegisterRequest,
            Patient,
            CreatePatientRequest,
            UpdatePatientRequest,
            Appointment,
            AppointmentStatus,
            CreateAppointmentRequest,
            UpdateAppointmentRequest,
            Odontogram,
            ToothRecord,
            ToothCondition,
            UpdateOdontogramRequest,
            UpdateToothRequest,
            CaseAssignment,
            CaseStatus,
            CreateCaseRequest,
            ReviewCaseRequest,
            CreateUserRequest,
            UpdateUserRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Login, logout and session queries"),
        (name = "Patients", description = "Patient record management"),
        (name = "Odontograms", description = "Per-patient tooth charts"),
        (name = "Appointments", description = "Appointment booking and lifecycle"),
        (name = "Academic", description = "Student case assignments and review"),
        (name = "Users", description = "Account administration"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;
