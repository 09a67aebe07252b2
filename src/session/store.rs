// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Persistence of one authenticated identity with an expiry.
//!
//! A session record occupies two paired keys: a JSON identity payload and an
//! integer epoch-millisecond expiry. Splitting them keeps partial corruption
//! structurally detectable - one key without the other is invalid, not a
//! half-usable record. Expiry is **absolute**: reading a record never slides
//! its deadline, and expiry itself is detected lazily at read time rather
//! than by a timer.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::auth::Identity;

use super::storage::StorageArea;

/// Sessions live this long from the moment of login.
pub const SESSION_TTL_HOURS: i64 = 24;

const IDENTITY_SUFFIX: &str = "identity";
const EXPIRY_SUFFIX: &str = "expires_at";

/// A persisted login: who, issued when, valid until.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub identity: Identity,
    /// Epoch milliseconds at creation.
    pub issued_at: i64,
    /// Epoch milliseconds; always `issued_at + 24h` at creation.
    pub expires_at: i64,
}

/// Why a stored record could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Neither key is present: nobody is logged in.
    #[error("no session record")]
    Missing,
    /// Exactly one of the paired keys is present.
    #[error("partial session record: {0} key missing")]
    Partial(&'static str),
    /// A key exists but its content does not parse.
    #[error("corrupted session record: {0}")]
    Corrupted(String),
    /// The record's deadline has passed.
    #[error("session record expired")]
    Expired,
}

/// Store for a single session record over a [`StorageArea`].
///
/// The default scope (`session`) models one browser profile; the server's
/// registry uses one scope per issued token.
pub struct SessionStore<S> {
    storage: Arc<S>,
    identity_key: String,
    expiry_key: String,
}

impl<S: StorageArea> SessionStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self::scoped(storage, "session")
    }

    /// Store whose keys live under `<scope>.`.
    pub fn scoped(storage: Arc<S>, scope: &str) -> Self {
        Self {
            storage,
            identity_key: format!("{scope}.{IDENTITY_SUFFIX}"),
            expiry_key: format!("{scope}.{EXPIRY_SUFFIX}"),
        }
    }

    pub fn identity_key(&self) -> &str {
        &self.identity_key
    }

    pub fn expiry_key(&self) -> &str {
        &self.expiry_key
    }

    /// Persist `identity` with a fresh 24h deadline.
    pub fn save(&self, identity: &Identity) -> SessionRecord {
        let issued_at = Utc::now().timestamp_millis();
        let expires_at = issued_at + SESSION_TTL_HOURS * 60 * 60 * 1000;

        let payload =
            serde_json::to_string(identity).expect("identity serializes to JSON");
        // Replace, never patch: clearing first means observers only ever see
        // empty, partial or complete states, not a fresh payload against a
        // stale deadline. A write torn between the two keys leaves a record
        // that `inspect` classifies as partial, never one that validates.
        self.clear();
        self.storage.set(&self.identity_key, &payload);
        self.storage.set(&self.expiry_key, &expires_at.to_string());

        SessionRecord {
            identity: identity.clone(),
            issued_at,
            expires_at,
        }
    }

    /// Classify the stored record without touching it.
    pub fn inspect(&self) -> Result<SessionRecord, SessionError> {
        let payload = self.storage.get(&self.identity_key);
        let expiry = self.storage.get(&self.expiry_key);

        let (payload, expiry) = match (payload, expiry) {
            (None, None) => return Err(SessionError::Missing),
            (Some(_), None) => return Err(SessionError::Partial(EXPIRY_SUFFIX)),
            (None, Some(_)) => return Err(SessionError::Partial(IDENTITY_SUFFIX)),
            (Some(p), Some(e)) => (p, e),
        };

        let identity: Identity = serde_json::from_str(&payload)
            .map_err(|e| SessionError::Corrupted(e.to_string()))?;
        let expires_at: i64 = expiry
            .parse()
            .map_err(|_| SessionError::Corrupted(format!("bad expiry value: {expiry}")))?;

        if Utc::now().timestamp_millis() >= expires_at {
            return Err(SessionError::Expired);
        }

        Ok(SessionRecord {
            identity,
            issued_at: expires_at - SESSION_TTL_HOURS * 60 * 60 * 1000,
            expires_at,
        })
    }

    /// Read the stored identity.
    ///
    /// Anything other than a valid, unexpired record degrades to `None`, and
    /// the offending keys are cleared so the failure is not re-diagnosed on
    /// every read.
    pub fn load(&self) -> Option<Identity> {
        match self.inspect() {
            Ok(record) => Some(record.identity),
            Err(SessionError::Missing) => None,
            Err(_) => {
                self.clear();
                None
            }
        }
    }

    /// Remove both keys. Idempotent.
    pub fn clear(&self) {
        self.storage.remove(&self.identity_key);
        self.storage.remove(&self.expiry_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::session::storage::MemoryStorage;

    fn identity() -> Identity {
        Identity {
            id: "user_1".into(),
            email: "patient@clinica.com".into(),
            name: "Juan Pérez".into(),
            role: Role::Patient,
            specialty: None,
        }
    }

    fn store() -> (Arc<MemoryStorage>, SessionStore<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        (storage, store)
    }

    #[test]
    fn save_then_load_returns_identity_unchanged() {
        let (_, store) = store();
        store.save(&identity());
        assert_eq!(store.load(), Some(identity()));
    }

    #[test]
    fn record_deadline_is_issued_plus_ttl() {
        let (_, store) = store();
        let record = store.save(&identity());
        assert_eq!(record.expires_at - record.issued_at, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn expired_record_loads_as_none_and_clears() {
        let (storage, store) = store();
        store.save(&identity());

        // Rewind the deadline into the past.
        storage.set(store.expiry_key(), "1000");

        assert_eq!(store.load(), None);
        assert_eq!(storage.get(store.identity_key()), None);
        assert_eq!(storage.get(store.expiry_key()), None);
        // Expiry is idempotent.
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_then_load_is_none() {
        let (_, store) = store();
        store.save(&identity());
        store.clear();
        assert_eq!(store.load(), None);
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn partial_record_is_treated_as_absent_and_cleared() {
        // Payload without expiry.
        let (storage, store) = store();
        store.save(&identity());
        storage.remove(store.expiry_key());
        assert_eq!(store.load(), None);
        assert_eq!(storage.get(store.identity_key()), None);

        // Expiry without payload.
        let (storage, store) = self::store();
        store.save(&identity());
        storage.remove(store.identity_key());
        assert_eq!(store.load(), None);
        assert_eq!(storage.get(store.expiry_key()), None);
    }

    #[test]
    fn corrupted_payload_is_cleared() {
        let (storage, store) = store();
        store.save(&identity());
        storage.set(store.identity_key(), "{not json");

        assert_eq!(store.load(), None);
        assert_eq!(storage.get(store.identity_key()), None);
        assert_eq!(storage.get(store.expiry_key()), None);
    }

    #[test]
    fn inspect_classifies_failures() {
        let (storage, store) = store();
        assert_eq!(store.inspect(), Err(SessionError::Missing));

        store.save(&identity());
        assert!(store.inspect().is_ok());

        storage.remove(store.expiry_key());
        assert!(matches!(store.inspect(), Err(SessionError::Partial(_))));

        store.save(&identity());
        storage.set(store.expiry_key(), "not-a-number");
        assert!(matches!(store.inspect(), Err(SessionError::Corrupted(_))));

        store.save(&identity());
        storage.set(store.expiry_key(), "1");
        assert_eq!(store.inspect(), Err(SessionError::Expired));
    }

    #[test]
    fn load_does_not_slide_the_expiry() {
        let (storage, store) = store();
        store.save(&identity());
        let deadline_before = storage.get(store.expiry_key());

        store.load();
        store.load();

        assert_eq!(storage.get(store.expiry_key()), deadline_before);
    }

    #[test]
    fn scoped_stores_do_not_collide() {
        let storage = Arc::new(MemoryStorage::new());
        let a = SessionStore::scoped(storage.clone(), "session.a");
        let b = SessionStore::scoped(storage.clone(), "session.b");

        a.save(&identity());
        assert_eq!(b.load(), None);
        assert_eq!(a.load(), Some(identity()));

        b.save(&identity());
        a.clear();
        assert_eq!(b.load(), Some(identity()));
    }
}
