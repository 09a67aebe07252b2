// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Clinica Dental Universitaria

//! Shared key/value storage with change notifications.
//!
//! The session layer persists records through this abstraction instead of
//! touching a concrete map, so the same store logic backs both the server's
//! session registry and the single-profile store the session context reads.
//! Change notifications play the part of the browser's storage event: every
//! actual mutation is broadcast to subscribers so other holders of the same
//! storage can re-synchronize.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// One observed storage mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed.
    pub key: String,
    /// Value before the change (`None` if the key was absent).
    pub old: Option<String>,
    /// Value after the change (`None` if the key was removed).
    pub new: Option<String>,
}

/// Subscriber callback. Invoked synchronously after the mutation is visible.
pub type StorageListener = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

/// String key/value storage shared between execution contexts.
///
/// Implementations must guarantee read-after-write consistency within one
/// context and must notify subscribers only on actual changes (setting a key
/// to its current value or removing an absent key is silent).
pub trait StorageArea: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    /// Register a change listener for the lifetime of the storage.
    fn subscribe(&self, listener: StorageListener);
}

/// In-memory [`StorageArea`].
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    listeners: Mutex<Vec<StorageListener>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the keys currently present.
    pub fn keys(&self) -> Vec<String> {
        self.entries().keys().cloned().collect()
    }

    /// Dispatch an event to every subscriber.
    ///
    /// Listeners are cloned out of the registry first: a listener may itself
    /// mutate the storage, which re-enters this method.
    fn notify(&self, event: &StorageEvent) {
        let listeners: Vec<StorageListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(event);
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageArea for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let old = {
            let mut entries = self.entries();
            entries.insert(key.to_string(), value.to_string())
        };
        if old.as_deref() == Some(value) {
            return;
        }
        self.notify(&StorageEvent {
            key: key.to_string(),
            old,
            new: Some(value.to_string()),
        });
    }

    fn remove(&self, key: &str) {
        let old = self.entries().remove(key);
        let Some(old) = old else { return };
        self.notify(&StorageEvent {
            key: key.to_string(),
            old: Some(old),
            new: None,
        });
    }

    fn subscribe(&self, listener: StorageListener) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }
}
