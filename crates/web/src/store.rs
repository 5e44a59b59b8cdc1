//! Durable single-slot storage for the access token.

use std::cell::RefCell;
use std::rc::Rc;

/// Well-known storage key holding the raw access token.
pub const DEFAULT_STORAGE_KEY: &str = "accessToken";

/// One durable slot holding the raw token string.
///
/// `set` overwrites unconditionally, `clear` is idempotent. No expiry logic
/// lives here. Implementations are handed to whoever needs them; there is no
/// global instance.
pub trait SessionStore {
    /// Name of the slot.
    fn key(&self) -> &str;

    fn get(&self) -> Option<String>;

    fn set(&self, token: &str);

    fn clear(&self);
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) {
        (**self).set(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) {
        (**self).set(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-process slot (native tooling, tests).
///
/// The console runs on a single-threaded event loop, so interior mutability
/// through `RefCell` is enough.
#[derive(Debug)]
pub struct MemoryStore {
    key: String,
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            slot: RefCell::new(None),
        }
    }

    /// Store pre-seeded with `token`.
    pub fn with_token(key: impl Into<String>, token: impl Into<String>) -> Self {
        let store = Self::new(key);
        store.slot.replace(Some(token.into()));
        store
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

impl SessionStore for MemoryStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn get(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn set(&self, token: &str) {
        self.slot.replace(Some(token.to_string()));
    }

    fn clear(&self) {
        self.slot.replace(None);
    }
}
