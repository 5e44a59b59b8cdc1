//! `console-web`
//!
//! **Responsibility:** session lifecycle and route guarding for the admin
//! console.
//!
//! This crate provides:
//! - The single-slot token store ([`SessionStore`])
//! - Login/logout over that store ([`Authenticator`])
//! - The navigation-time guard ([`RouteGuard`]) and route table
//! - Browser bindings (`localStorage`, Leptos components) on wasm32
//!
//! Decoding and authorization live in `console-auth`; this crate only
//! orchestrates them.

pub mod authenticator;
pub mod config;
pub mod guard;
pub mod navigator;
pub mod routes;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use authenticator::{Authenticator, LoginError};
pub use config::ConsoleConfig;
pub use guard::{GuardDecision, GuardOutcome, RouteGuard, screen_gate};
pub use navigator::Navigator;
pub use routes::{Route, RouteAccess, RouteTable};
pub use store::{MemoryStore, SessionStore};
