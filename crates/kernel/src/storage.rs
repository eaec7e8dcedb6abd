//! Key-value persistence for navigation effects.
//!
//! The shell persists two strings (the last route and the signed-in user) in
//! whatever the host provides: browser local storage, a file, a keychain.
//! [`MemoryStore`] backs tests and headless hosts.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::guard::Effect;

/// Host-provided string storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Apply effects in order.
pub fn apply_effects<S: KeyValueStore + ?Sized>(store: &S, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::Store { key, value } => store.set(key, value),
            Effect::Remove { key } => store.remove(key),
        }
    }
}
