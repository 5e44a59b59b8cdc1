//! Session lifecycle over the token store: login, logout, current session.

use thiserror::Error;

use console_auth::{Session, TokenError};
use console_core::Timestamp;

use crate::ConsoleConfig;
use crate::store::SessionStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("token has expired")]
    Expired,

    #[error("token has no expiration claim")]
    MissingExpiry,
}

/// Owns the token slot and turns it into a [`Session`] on demand.
///
/// Sessions are never cached here: every call re-reads the slot, so a token
/// written by another flow is picked up on the next evaluation.
#[derive(Debug)]
pub struct Authenticator<S> {
    store: S,
    require_expiry: bool,
}

impl<S: SessionStore> Authenticator<S> {
    pub fn new(store: S, config: &ConsoleConfig) -> Self {
        Self {
            store,
            require_expiry: config.require_expiry,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decode `token`, check it is usable at `now`, then persist it.
    ///
    /// Nothing is written when the token is rejected.
    pub fn login(&self, token: &str, now: Timestamp) -> Result<Session, LoginError> {
        let session = Session::from_token(token)?;
        self.ensure_usable(&session, now)?;

        self.store.set(session.token());
        tracing::info!(
            subject_id = %session.claims().subject_id,
            company_id = %session.claims().company_id,
            "session started"
        );
        Ok(session)
    }

    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("session ended");
    }

    /// The usable session held in the slot, if any.
    ///
    /// An undecodable, expired or (with `require_expiry`) unbounded token is
    /// discarded: the slot is cleared and `None` is returned.
    pub fn current(&self, now: Timestamp) -> Option<Session> {
        let token = self.store.get()?;

        let session = match Session::from_token(token) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, key = self.store.key(), "discarding undecodable token");
                self.store.clear();
                return None;
            }
        };

        if let Err(e) = self.ensure_usable(&session, now) {
            tracing::debug!(
                reason = %e,
                subject_id = %session.claims().subject_id,
                "discarding unusable session"
            );
            self.store.clear();
            return None;
        }

        Some(session)
    }

    fn ensure_usable(&self, session: &Session, now: Timestamp) -> Result<(), LoginError> {
        if !session.has_expiry() {
            if self.require_expiry {
                return Err(LoginError::MissingExpiry);
            }
            tracing::debug!(
                subject_id = %session.claims().subject_id,
                "token has no exp claim; session will not time out"
            );
        }
        if session.is_expired(now) {
            return Err(LoginError::Expired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use console_auth::Claims;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;
    use crate::MemoryStore;

    fn mint(payload: serde_json::Value) -> String {
        jsonwebtoken::encode(&Header::default(), &payload, &EncodingKey::from_secret(b"k"))
            .expect("failed to encode jwt")
    }

    fn token_expiring_in(delta: TimeDelta) -> String {
        mint(json!({
            "sub": 2, "username": "rui", "companyId": 5, "role": "user",
            "exp": (Utc::now() + delta).timestamp()
        }))
    }

    fn unbounded_token() -> String {
        mint(json!({ "sub": 2, "username": "rui", "companyId": 5, "role": "user" }))
    }

    #[test]
    fn login_persists_valid_token() {
        let auth = Authenticator::new(MemoryStore::default(), &ConsoleConfig::default());
        let token = token_expiring_in(TimeDelta::minutes(10));

        let session = auth.login(&token, Utc::now()).unwrap();

        assert_eq!(session.token(), token);
        assert_eq!(auth.store().get(), Some(token));
    }

    #[test]
    fn login_rejects_garbage_without_writing() {
        let auth = Authenticator::new(MemoryStore::default(), &ConsoleConfig::default());

        let err = auth.login("garbage", Utc::now()).unwrap_err();

        assert!(matches!(err, LoginError::Token(TokenError::InvalidTokenFormat { .. })));
        assert_eq!(auth.store().get(), None);
    }

    #[test]
    fn login_rejects_expired_token() {
        let auth = Authenticator::new(MemoryStore::default(), &ConsoleConfig::default());
        let token = token_expiring_in(TimeDelta::minutes(-1));

        assert_eq!(auth.login(&token, Utc::now()).unwrap_err(), LoginError::Expired);
        assert_eq!(auth.store().get(), None);
    }

    #[test]
    fn logout_clears_slot() {
        let store = MemoryStore::with_token("accessToken", token_expiring_in(TimeDelta::hours(1)));
        let auth = Authenticator::new(store, &ConsoleConfig::default());

        auth.logout();

        assert_eq!(auth.current(Utc::now()), None);
    }

    #[test]
    fn current_discards_expired_token() {
        let store = MemoryStore::with_token("accessToken", token_expiring_in(TimeDelta::seconds(-5)));
        let auth = Authenticator::new(store, &ConsoleConfig::default());

        assert_eq!(auth.current(Utc::now()), None);
        assert_eq!(auth.store().get(), None);
    }

    #[test]
    fn current_discards_undecodable_token() {
        let store = MemoryStore::with_token("accessToken", "a.b");
        let auth = Authenticator::new(store, &ConsoleConfig::default());

        assert_eq!(auth.current(Utc::now()), None);
        assert_eq!(auth.store().get(), None);
    }

    #[test]
    fn unbounded_token_is_accepted_by_default() {
        let store = MemoryStore::with_token("accessToken", unbounded_token());
        let auth = Authenticator::new(store, &ConsoleConfig::default());

        let session = auth.current(Utc::now()).unwrap();
        let claims: &Claims = session.claims();
        assert_eq!(claims.expires_at, None);
    }

    #[test]
    fn unbounded_token_is_rejected_when_expiry_required() {
        let config = ConsoleConfig {
            require_expiry: true,
            ..ConsoleConfig::default()
        };
        let auth = Authenticator::new(MemoryStore::default(), &config);

        assert_eq!(
            auth.login(&unbounded_token(), Utc::now()).unwrap_err(),
            LoginError::MissingExpiry
        );

        auth.store().set(&unbounded_token());
        assert_eq!(auth.current(Utc::now()), None);
    }
}
