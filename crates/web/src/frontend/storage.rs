use web_sys::Storage;

use crate::store::SessionStore;

/// Token slot in the browser's `localStorage`.
///
/// Storage can be unavailable (private mode, disabled by policy); that is
/// logged and behaves like an empty slot.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Option<Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!(error = ?e, "localStorage unavailable");
                None
            }
        }
    }
}

impl SessionStore for LocalStorageStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn get(&self) -> Option<String> {
        let storage = self.storage()?;
        match storage.get_item(&self.key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = ?e, key = %self.key, "failed to read token");
                None
            }
        }
    }

    fn set(&self, token: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.set_item(&self.key, token) {
                tracing::warn!(error = ?e, key = %self.key, "failed to write token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.remove_item(&self.key) {
                tracing::warn!(error = ?e, key = %self.key, "failed to remove token");
            }
        }
    }
}
