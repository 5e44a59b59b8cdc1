//! Browser bindings: `localStorage` token slot and Leptos guard components.

pub mod components;
pub mod storage;

use std::rc::Rc;

use leptos::provide_context;

use crate::{ConsoleConfig, RouteGuard};

pub use components::{Gate, Guarded};
pub use storage::LocalStorageStore;

/// Guard shared with every component through Leptos context.
pub type ConsoleGuard = Rc<RouteGuard<LocalStorageStore>>;

/// Install the console guard into the current reactive scope.
///
/// Call once from the root component, before any `<Guarded>` renders.
pub fn provide_console(config: ConsoleConfig) -> ConsoleGuard {
    console_error_panic_hook::set_once();

    let store = LocalStorageStore::new(config.storage_key.clone());
    let guard: ConsoleGuard = Rc::new(RouteGuard::new(store, config));
    provide_context(Rc::clone(&guard));
    guard
}
