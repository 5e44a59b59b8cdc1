//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic failures of value construction.
/// Token decoding has its own error type in `console-auth`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_carries_message() {
        let err = DomainError::invalid_id("expected integer, got \"acme\"");
        assert_eq!(err.to_string(), "invalid identifier: expected integer, got \"acme\"");
    }
}
