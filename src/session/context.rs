// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Process-wide holder of the current identity.
//!
//! One `SessionContext` models one execution context (a tab, in the original
//! portal). Cloning it hands the same shared state to additional consumers;
//! however many of them call [`SessionContext::initialize`], the storage read
//! runs once per [`InitGuard`]. Two contexts built over the same storage with
//! independent guards model two tabs: they reconcile exclusively through
//! storage change notifications.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::auth::Identity;

use super::storage::StorageArea;
use super::store::{SessionError, SessionStore};

/// Single-use initialization claim.
///
/// An explicit object rather than a module static so tests (and any embedder
/// that restarts the app shell) can construct a fresh one; in the running
/// server it lives for the process lifetime.
#[derive(Debug, Default)]
pub struct InitGuard {
    claimed: AtomicBool,
}

impl InitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly once.
    pub fn claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
struct ContextShared {
    identity: Option<Identity>,
    initialized: bool,
}

/// Shared session state with write-through persistence.
pub struct SessionContext<S> {
    store: Arc<SessionStore<S>>,
    init: Arc<InitGuard>,
    shared: Arc<RwLock<ContextShared>>,
}

impl<S> Clone for SessionContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            init: self.init.clone(),
            shared: self.shared.clone(),
        }
    }
}

fn read_shared(shared: &RwLock<ContextShared>) -> std::sync::RwLockReadGuard<'_, ContextShared> {
    shared.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_shared(shared: &RwLock<ContextShared>) -> std::sync::RwLockWriteGuard<'_, ContextShared> {
    shared.write().unwrap_or_else(PoisonError::into_inner)
}

impl<S: StorageArea + 'static> SessionContext<S> {
    pub fn new(storage: Arc<S>, init: Arc<InitGuard>) -> Self {
        let store = Arc::new(SessionStore::new(storage.clone()));
        let shared = Arc::new(RwLock::new(ContextShared::default()));

        // Re-synchronize when another context touches our keys. Weak
        // references keep a dropped context from pinning its state alive
        // through the storage's listener registry.
        let identity_key = store.identity_key().to_string();
        let expiry_key = store.expiry_key().to_string();
        let store_weak = Arc::downgrade(&store);
        let shared_weak = Arc::downgrade(&shared);
        storage.subscribe(Arc::new(move |event| {
            if event.key != identity_key && event.key != expiry_key {
                return;
            }
            let (Some(store), Some(shared)) = (store_weak.upgrade(), shared_weak.upgrade())
            else {
                return;
            };
            let identity = match store.inspect() {
                Ok(record) => Some(record.identity),
                // One key without its pair is a save or clear caught between
                // its two writes; the event for the second write completes
                // the picture, and reacting now would scrub a live record.
                Err(SessionError::Partial(_)) => return,
                // Load before locking: scrubbing an invalid record re-enters
                // this listener.
                Err(_) => store.load(),
            };
            let mut state = write_shared(&shared);
            if state.initialized {
                state.identity = identity;
            }
        }));

        Self { store, init, shared }
    }

    /// Resolve the persisted identity into shared state, once.
    ///
    /// Until the first caller completes, `is_loading` is `true` and
    /// consumers must treat the identity as unknown. Later calls (and calls
    /// on clones) observe the already-resolved state without re-reading
    /// storage.
    pub fn initialize(&self) {
        if !self.init.claim() {
            return;
        }
        let identity = self.store.load();
        let mut state = write_shared(&self.shared);
        state.identity = identity;
        state.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        read_shared(&self.shared).initialized
    }

    pub fn is_loading(&self) -> bool {
        !self.is_initialized()
    }

    pub fn identity(&self) -> Option<Identity> {
        read_shared(&self.shared).identity.clone()
    }

    /// Persist a fresh login and publish it to all consumers.
    pub fn login(&self, identity: Identity) {
        self.store.save(&identity);
        let mut state = write_shared(&self.shared);
        state.identity = Some(identity);
        state.initialized = true;
    }

    /// Clear the persisted record and the shared identity.
    pub fn logout(&self) {
        self.store.clear();
        let mut state = write_shared(&self.shared);
        state.identity = None;
        state.initialized = true;
    }
}
