//! Mock session storage for testing.

use crate::providers::SessionStorage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock session storage backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MockSessionStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MockSessionStorage {
    /// Create an empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the stored items.
    #[must_use]
    pub fn items(&self) -> HashMap<String, String> {
        self.locked().clone()
    }
}

impl SessionStorage for MockSessionStorage {
    fn set_item(&self, key: &str, value: &str) {
        self.locked().insert(key.to_owned(), value.to_owned());
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.locked().get(key).cloned()
    }
}
