use chrono::TimeDelta;
use serde::Serialize;

use console_core::{CompanyId, SubjectId, Timestamp, from_epoch_seconds};

use crate::{Claims, Evaluator, Role, TokenError, decode_claims};

/// Who the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject_id: SubjectId,
    pub username: String,
    pub company_id: CompanyId,
    pub role: Role,
}

/// A decoded access token.
///
/// The claims are decoded once, at construction, and never change. A new
/// token means a new `Session`; expiry is observed by asking
/// [`Session::is_expired`] with the current clock, not by a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: Claims,
}

impl Session {
    /// Decode `token` and wrap it.
    pub fn from_token(token: impl Into<String>) -> Result<Self, TokenError> {
        let token = token.into();
        let claims = decode_claims(&token)?;
        Ok(Self { token, claims })
    }

    /// The raw token, as it should be sent back to the API.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.claims.subject_id,
            username: self.claims.username.clone(),
            company_id: self.claims.company_id,
            role: self.claims.role.clone(),
        }
    }

    /// Capability/product checks against this session's grants.
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self)
    }

    /// `true` iff the token carries `exp` and `now >= exp`.
    ///
    /// A token without `exp` never expires by this check.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        match self.claims.expires_at {
            Some(exp) => now.timestamp() >= exp,
            None => false,
        }
    }

    pub fn has_expiry(&self) -> bool {
        self.claims.expires_at.is_some()
    }

    pub fn issued_at(&self) -> Option<Timestamp> {
        self.claims.issued_at.and_then(from_epoch_seconds)
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.claims.expires_at.and_then(from_epoch_seconds)
    }

    /// Time left before expiry, clamped at zero. `None` without `exp`.
    pub fn time_remaining(&self, now: Timestamp) -> Option<TimeDelta> {
        let exp = self.claims.expires_at?;
        let secs = exp.saturating_sub(now.timestamp()).max(0);
        Some(TimeDelta::try_seconds(secs).unwrap_or(TimeDelta::MAX))
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn token(payload: serde_json::Value) -> String {
        format!(
            "e30.{}.sig",
            URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes())
        )
    }

    fn session_expiring_at(exp: Option<i64>) -> Session {
        let mut payload = json!({
            "sub": 3, "username": "carla", "companyId": 10, "role": "admin",
            "permissions": ["view_inventarios", "edit_users"],
            "products": ["Confinus"],
            "iat": 1_000
        });
        if let Some(exp) = exp {
            payload["exp"] = json!(exp);
        }
        Session::from_token(token(payload)).unwrap()
    }

    fn at(secs: i64) -> Timestamp {
        from_epoch_seconds(secs).unwrap()
    }

    #[test]
    fn keeps_raw_token_and_identity() {
        let raw = token(json!({ "sub": 3, "username": "carla", "companyId": 10, "role": "admin" }));
        let session = Session::from_token(raw.clone()).unwrap();

        assert_eq!(session.token(), raw);
        assert_eq!(
            session.identity(),
            Identity {
                subject_id: SubjectId::new(3),
                username: "carla".to_string(),
                company_id: CompanyId::new(10),
                role: Role::new("admin"),
            }
        );
    }

    #[test]
    fn propagates_decode_errors() {
        assert_eq!(
            Session::from_token("not-a-token").unwrap_err(),
            TokenError::InvalidTokenFormat { segments: 1 }
        );
    }

    #[test]
    fn expires_exactly_at_exp() {
        let session = session_expiring_at(Some(5_000));
        assert!(!session.is_expired(at(4_999)));
        assert!(session.is_expired(at(5_000)));
        assert!(session.is_expired(at(5_001)));
    }

    #[test]
    fn sub_second_before_exp_is_not_expired() {
        let session = session_expiring_at(Some(5_000));
        let just_before = at(4_999) + TimeDelta::milliseconds(999);
        assert!(!session.is_expired(just_before));
    }

    #[test]
    fn without_exp_never_expires() {
        let session = session_expiring_at(None);
        assert!(!session.has_expiry());
        assert!(!session.is_expired(at(i32::MAX as i64)));
        assert_eq!(session.time_remaining(at(0)), None);
        assert_eq!(session.expires_at(), None);
    }

    #[test]
    fn time_remaining_clamps_at_zero() {
        let session = session_expiring_at(Some(5_000));
        assert_eq!(session.time_remaining(at(4_000)), Some(TimeDelta::seconds(1_000)));
        assert_eq!(session.time_remaining(at(9_000)), Some(TimeDelta::zero()));
        assert_eq!(session.issued_at(), Some(at(1_000)));
    }

    proptest! {
        /// Property: with `exp = T`, a session is expired exactly when `now >= T`.
        #[test]
        fn expiry_boundary(exp in 1i64..4_000_000_000, now in 0i64..4_000_000_000) {
            let session = session_expiring_at(Some(exp));
            prop_assert_eq!(session.is_expired(at(now)), now >= exp);
        }
    }
}
