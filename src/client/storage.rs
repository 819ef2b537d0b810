//! Device key-value storage boundary.
//!
//! On a phone this is backed by the platform's async storage; the server
//! sync contract only needs get/set/remove of string keys.

use std::collections::HashMap;
use std::sync::Mutex;

/// Key under which the bearer token is persisted between launches.
pub const TOKEN_KEY: &str = "token";
/// Key for the local-only dark mode flag (never synced to the server).
pub const DARK_MODE_KEY: &str = "darkMode";

/// Minimal persistence capability the session cache depends on.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and non-mobile hosts.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.inner.lock().unwrap().remove(key);
    }
}
