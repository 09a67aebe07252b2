// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! # Session Module
//!
//! Everything between "the user typed a valid password" and "this request
//! carries identity X":
//!
//! - [`storage`] - shared key/value storage with change notifications
//! - [`store`] - one identity + expiry record over paired storage keys
//! - [`context`] - process-wide identity holder with once-only initialization
//! - [`guard`] - the pure allow/deny/wait decision for protected routes
//! - [`policy`] - the authoritative route → roles table and landing pages
//! - [`gate`] - the cookie-presence edge filter
//!
//! ## Session Flow
//!
//! 1. Login verifies credentials and asks [`SessionManager`] for a token
//! 2. The token-scoped record is persisted through a [`SessionStore`]
//!    (24h absolute expiry, checked lazily on read)
//! 3. The token travels in an opaque cookie; the edge gate checks only its
//!    presence, the guard middleware resolves it back to an [`Identity`]
//!    and applies the role policy before any handler runs

pub mod context;
pub mod gate;
pub mod guard;
pub mod policy;
pub mod storage;
pub mod store;

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::Identity;

pub use context::{InitGuard, SessionContext};
pub use gate::EdgeDecision;
pub use guard::GuardDecision;
pub use policy::{RouteAccess, RoutePolicy};
pub use storage::{MemoryStorage, StorageArea};
pub use store::{SessionRecord, SessionStore, SESSION_TTL_HOURS};

/// Server-side session registry.
///
/// One storage area holds every active session; each issued token scopes its
/// own paired-key record, so expiry, corruption handling and clearing behave
/// exactly like the single-profile store.
#[derive(Clone, Default)]
pub struct SessionManager {
    storage: Arc<MemoryStorage>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn store_for(&self, token: &str) -> SessionStore<MemoryStorage> {
        SessionStore::scoped(self.storage.clone(), &format!("session.{token}"))
    }

    /// Issue a fresh opaque token for `identity`.
    pub fn create(&self, identity: &Identity) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.store_for(&token).save(identity);
        token
    }

    /// Resolve a token back to its identity.
    ///
    /// Expired or corrupted records degrade to `None` and are erased.
    pub fn resolve(&self, token: &str) -> Option<Identity> {
        self.store_for(token).load()
    }

    /// Classify a token's record without erasing it.
    ///
    /// For callers that answer differently for "expired" versus "never
    /// existed"; pair with [`SessionManager::revoke`] to scrub a record
    /// found invalid.
    pub fn inspect(&self, token: &str) -> Result<SessionRecord, store::SessionError> {
        self.store_for(token).inspect()
    }

    /// Drop a session. Idempotent; unknown tokens are a no-op.
    pub fn revoke(&self, token: &str) {
        self.store_for(token).clear();
    }

    /// Number of session records currently held (live or not-yet-scrubbed).
    pub fn active_count(&self) -> usize {
        self.storage
            .keys()
            .iter()
            .filter(|key| key.ends_with(".identity"))
            .count()
    }
}
