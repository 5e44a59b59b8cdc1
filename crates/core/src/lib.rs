//! `console-core` — shared primitives for the admin console.
//!
//! Identifiers, the domain error model and timestamp helpers. No IO.

pub mod error;
pub mod id;
pub mod time;

pub use error::DomainError;
pub use id::{CompanyId, SubjectId};
pub use time::{Timestamp, from_epoch_seconds};
