//! `console-auth` — client-side session & authorization engine.
//!
//! Decodes bearer tokens into [`Claims`], wraps them in an immutable
//! [`Session`] and answers capability/product questions through the
//! [`Evaluator`]. No storage, no routing, no signature verification.

pub mod authorize;
pub mod claims;
pub mod codec;
pub mod error;
pub mod permissions;
pub mod products;
pub mod roles;
pub mod session;

pub use authorize::{
    AuthorizationExplanation, AuthorizationQuery, AuthorizationResult, DenialKind, DenialReason,
    Evaluator, PrincipalState,
};
pub use claims::Claims;
pub use codec::decode_claims;
pub use error::TokenError;
pub use permissions::Permission;
pub use products::Product;
pub use roles::Role;
pub use session::{Identity, Session};
