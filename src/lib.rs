// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Clinica Portal - University Dental Clinic API
//!
//! This crate provides the role-based backend for a university dental
//! clinic: patients, students, professors, admins and the front desk share
//! one portal for appointments, patient records, odontograms and academic
//! case workflows, all gated by a cookie-backed session layer.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Identity, roles, credentials and request gating
//! - `session` - Session records, context, route policy and gates
//! - `store` - In-memory store for the clinic's working data

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod state;
pub mod store;
