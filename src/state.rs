// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::UserDirectory;
use crate::session::{RoutePolicy, SessionManager};
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub users: Arc<UserDirectory>,
    pub sessions: SessionManager,
    pub policy: Arc<RoutePolicy>,
}

impl AppState {
    pub fn new(store: InMemoryStore, users: UserDirectory) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            users: Arc::new(users),
            sessions: SessionManager::new(),
            policy: Arc::new(RoutePolicy::portal()),
        }
    }
}

impl Default for AppState {
    /// Demo state: seeded accounts plus the working data hanging off them.
    fn default() -> Self {
        let users = UserDirectory::with_demo_accounts();
        let mut store = InMemoryStore::new();
        store.seed_demo(&users);
        Self::new(store, users)
    }
}
