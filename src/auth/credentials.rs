// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Credential verification and the account directory.
//!
//! [`CredentialVerifier`] is the substitution seam: the portal ships with a
//! plaintext in-memory [`UserDirectory`] seeded from a demo fixture, and a
//! deployment with real accounts replaces it with a salted-hash
//! implementation without touching the login handler.

use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateUserRequest, RegisterRequest, UpdateUserRequest};

use super::identity::Identity;
use super::roles::Role;

/// Capability for checking login credentials.
///
/// `verify` returns the account's identity on an exact email/password match
/// and `None` otherwise. Implementations decide how passwords are stored;
/// the demo [`UserDirectory`] keeps them in plaintext, which is acceptable
/// only because it is a development fixture.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Option<Identity>;
}

/// One account in the directory.
#[derive(Debug, Clone)]
struct UserAccount {
    identity: Identity,
    password: String,
}

/// In-memory account directory.
///
/// Holds every portal account (all roles) and doubles as the demo credential
/// table. Interior mutability so it can be shared behind an `Arc` between
/// the login surface and the admin user-management endpoints.
#[derive(Debug, Default)]
pub struct UserDirectory {
    accounts: RwLock<HashMap<String, UserAccount>>,
}

impl UserDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with the demo fixture: one account per role.
    ///
    /// Passwords match the account's role name; `admin@clinica.com`/`admin`
    /// is the canonical test login.
    pub fn with_demo_accounts() -> Self {
        let directory = Self::new();
        let seed: &[(&str, &str, &str, Role, Option<&str>)] = &[
            ("admin@clinica.com", "admin", "Dr. Admin", Role::Admin, None),
            ("patient@clinica.com", "patient", "Juan Pérez", Role::Patient, None),
            (
                "student@clinica.com",
                "student",
                "Ana Torres",
                Role::Student,
                Some("Endodoncia"),
            ),
            (
                "professor@clinica.com",
                "professor",
                "Dr. Carlos Ruiz",
                Role::Professor,
                Some("Ortodoncia"),
            ),
            ("secretary@clinica.com", "secretary", "María López", Role::Secretary, None),
        ];

        for (email, password, name, role, specialty) in seed {
            directory
                .insert_account(email, password, name, *role, specialty.map(String::from))
                .expect("demo fixture has no duplicate emails");
        }
        directory
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, UserAccount>> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, UserAccount>> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new account. Fails with 409 if the email is already taken.
    pub fn insert_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
        specialty: Option<String>,
    ) -> Result<Identity, ApiError> {
        let mut accounts = self.write();
        if accounts.values().any(|a| a.identity.email == email) {
            return Err(ApiError::conflict("An account with this email already exists"));
        }

        let identity = Identity {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            specialty,
        };
        accounts.insert(
            identity.id.clone(),
            UserAccount {
                identity: identity.clone(),
                password: password.to_string(),
            },
        );
        Ok(identity)
    }

    /// Self-service registration; new accounts are always patients.
    pub fn register(&self, request: RegisterRequest) -> Result<Identity, ApiError> {
        self.insert_account(&request.email, &request.password, &request.name, Role::Patient, None)
    }

    /// List every account's identity, ordered by email.
    pub fn list(&self) -> Vec<Identity> {
        let mut identities: Vec<Identity> =
            self.read().values().map(|a| a.identity.clone()).collect();
        identities.sort_by(|a, b| a.email.cmp(&b.email));
        identities
    }

    pub fn get(&self, user_id: &str) -> Result<Identity, ApiError> {
        self.read()
            .get(user_id)
            .map(|a| a.identity.clone())
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    pub fn find_by_email(&self, email: &str) -> Option<Identity> {
        self.read()
            .values()
            .find(|a| a.identity.email == email)
            .map(|a| a.identity.clone())
    }

    /// Admin account creation with an explicit role.
    pub fn create_user(&self, request: CreateUserRequest) -> Result<Identity, ApiError> {
        self.insert_account(
            &request.email,
            &request.password,
            &request.name,
            request.role,
            request.specialty,
        )
    }

    /// Update name/role/specialty/password; absent fields are left unchanged.
    ///
    /// Role changes take effect on the account's next login: identities
    /// already held by live sessions are immutable.
    pub fn update_user(
        &self,
        user_id: &str,
        request: UpdateUserRequest,
    ) -> Result<Identity, ApiError> {
        let mut accounts = self.write();
        let account = accounts
            .get_mut(user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        if let Some(name) = request.name {
            account.identity.name = name;
        }
        if let Some(role) = request.role {
            account.identity.role = role;
        }
        if let Some(specialty) = request.specialty {
            account.identity.specialty = if specialty.is_empty() { None } else { Some(specialty) };
        }
        if let Some(password) = request.password {
            account.password = password;
        }
        Ok(account.identity.clone())
    }

    pub fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        if self.write().remove(user_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("User not found"))
        }
    }
}

impl CredentialVerifier for UserDirectory {
    fn verify(&self, email: &str, password: &str) -> Option<Identity> {
        // Exact, case-sensitive match on both fields.
        self.read()
            .values()
            .find(|a| a.identity.email == email && a.password == password)
            .map(|a| a.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_admin_login_yields_admin_identity() {
        let directory = UserDirectory::with_demo_accounts();
        let identity = directory
            .verify("admin@clinica.com", "admin")
            .expect("demo admin credentials verify");
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.name, "Dr. Admin");
    }

    #[test]
    fn wrong_password_yields_none() {
        let directory = UserDirectory::with_demo_accounts();
        assert!(directory.verify("admin@clinica.com", "wrong").is_none());
        assert!(directory.verify("nobody@clinica.com", "admin").is_none());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let directory = UserDirectory::with_demo_accounts();
        assert!(directory.verify("Admin@clinica.com", "admin").is_none());
        assert!(directory.verify("admin@clinica.com", "Admin").is_none());
    }

    #[test]
    fn register_creates_patient_accounts() {
        let directory = UserDirectory::new();
        let identity = directory
            .register(RegisterRequest {
                email: "new@clinica.com".into(),
                password: "secret".into(),
                name: "New Patient".into(),
            })
            .unwrap();
        assert_eq!(identity.role, Role::Patient);
        assert_eq!(directory.verify("new@clinica.com", "secret"), Some(identity));
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let directory = UserDirectory::with_demo_accounts();
        let err = directory
            .register(RegisterRequest {
                email: "admin@clinica.com".into(),
                password: "x".into(),
                name: "Impostor".into(),
            })
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::CONFLICT);
    }

    #[test]
    fn update_user_changes_role_and_keeps_rest() {
        let directory = UserDirectory::with_demo_accounts();
        let student = directory.find_by_email("student@clinica.com").unwrap();

        let updated = directory
            .update_user(
                &student.id,
                UpdateUserRequest {
                    name: None,
                    role: Some(Role::Professor),
                    specialty: None,
                    password: None,
                },
            )
            .unwrap();
        assert_eq!(updated.role, Role::Professor);
        assert_eq!(updated.name, "Ana Torres");
        assert_eq!(updated.specialty.as_deref(), Some("Endodoncia"));
    }

    #[test]
    fn delete_user_removes_the_account() {
        let directory = UserDirectory::with_demo_accounts();
        let patient = directory.find_by_email("patient@clinica.com").unwrap();

        directory.delete_user(&patient.id).unwrap();
        assert!(directory.verify("patient@clinica.com", "patient").is_none());

        let err = directory.delete_user(&patient.id).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }
}
