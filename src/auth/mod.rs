// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! # Authentication Module
//!
//! Identity, roles, credentials and the request gates for the portal API.
//!
//! ## Auth Flow
//!
//! 1. `POST /v1/auth/login` verifies the email/password pair against the
//!    [`UserDirectory`]
//! 2. The session registry issues an opaque token, returned in the
//!    `clinica_session` cookie
//! 3. On each request:
//!    - the edge gate checks cookie **presence** against the public-path list
//!    - the route guard resolves the token to an [`Identity`] and applies
//!      the role policy before the handler runs
//!
//! ## Security
//!
//! - The demo credential table is plaintext by design; [`CredentialVerifier`]
//!   is the seam where a real deployment plugs in hashed verification
//! - Sessions expire 24h after login (absolute, checked lazily on read)
//! - Role checks happen server-side before dispatch; the cookie itself
//!   carries no claims to tamper with

pub mod credentials;
pub mod error;
pub mod extractor;
pub mod identity;
pub mod middleware;
pub mod roles;

pub use credentials::{CredentialVerifier, UserDirectory};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth, OptionalAuth};
pub use identity::Identity;
pub use roles::Role;
