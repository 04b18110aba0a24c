//! Best-effort persistence for store state.
//!
//! Browser builds write JSON blobs to `localStorage`; `MemoryStorage`
//! backs tests and server-side rendering, where no window exists.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde_json::Value;

/// Synchronous, best-effort key/value persistence. Failures are
/// swallowed: persisted state is a cache of server truth, never the
/// source of it.
pub trait StateStorage {
    fn save(&self, key: &str, value: &Value);
    fn load(&self, key: &str) -> Option<Value>;
    fn remove(&self, key: &str);
    /// Wipe every key, including entries written by other stores.
    fn clear_all(&self);
}

/// `window.localStorage`-backed storage.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn raw() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(feature = "hydrate")]
impl StateStorage for LocalStorage {
    fn save(&self, key: &str, value: &Value) {
        if let Some(storage) = Self::raw() {
            let _ = storage.set_item(key, &value.to_string());
        }
    }

    fn load(&self, key: &str) -> Option<Value> {
        let json = Self::raw()?.get_item(key).ok()??;
        serde_json::from_str(&json).ok()
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::raw() {
            let _ = storage.remove_item(key);
        }
    }

    fn clear_all(&self) {
        if let Some(storage) = Self::raw() {
            let _ = storage.clear();
        }
    }
}

/// In-memory storage for tests and SSR.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: std::cell::RefCell<std::collections::HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StateStorage for MemoryStorage {
    fn save(&self, key: &str, value: &Value) {
        self.entries.borrow_mut().insert(key.to_owned(), value.clone());
    }

    fn load(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn clear_all(&self) {
        self.entries.borrow_mut().clear();
    }
}
