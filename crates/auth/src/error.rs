use thiserror::Error;

/// Failure to turn a token string into [`Claims`](crate::Claims).
///
/// All variants are recoverable: callers fold them into the
/// unauthenticated state. Details are kept as strings so the error stays
/// `Clone + Eq`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token format: expected 3 dot-separated segments, found {segments}")]
    InvalidTokenFormat { segments: usize },

    #[error("invalid token encoding: {0}")]
    InvalidTokenEncoding(String),

    #[error("invalid token payload: {0}")]
    InvalidTokenPayload(String),
}
