//! Navigation-time guard: proceed, or redirect to login/home.

use console_auth::{AuthorizationQuery, AuthorizationResult, Session};
use console_core::Timestamp;

use crate::routes::{Route, RouteAccess};
use crate::store::SessionStore;
use crate::{Authenticator, ConsoleConfig, Navigator};

/// Terminal outcome of one guard evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    RedirectToLogin,
    RedirectToHome,
}

impl GuardOutcome {
    /// Route the router should navigate to, if any.
    pub fn redirect_target(self, config: &ConsoleConfig) -> Option<&str> {
        match self {
            GuardOutcome::Proceed => None,
            GuardOutcome::RedirectToLogin => Some(&config.login_route),
            GuardOutcome::RedirectToHome => Some(&config.home_route),
        }
    }
}

/// Guard outcome plus the session it was decided with.
///
/// The session is handed to the screen so its own checks do not decode the
/// token again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub outcome: GuardOutcome,
    pub session: Option<Session>,
}

impl GuardDecision {
    /// Check `query` against the decision's session.
    pub fn gate(&self, query: &AuthorizationQuery) -> AuthorizationResult {
        screen_gate(self.session.as_ref(), query)
    }

    /// Does `route`'s content render under this decision?
    ///
    /// Redirects render nothing. Public and login routes render whenever they
    /// proceed; protected routes must also satisfy their own requirement.
    pub fn screen(&self, route: &Route) -> AuthorizationResult {
        match (self.outcome, route.access) {
            (GuardOutcome::RedirectToLogin | GuardOutcome::RedirectToHome, _) => {
                AuthorizationResult::Denied
            }
            (GuardOutcome::Proceed, RouteAccess::Public | RouteAccess::Login) => {
                AuthorizationResult::Allowed
            }
            (GuardOutcome::Proceed, RouteAccess::Protected) => self.gate(&route.requires),
        }
    }
}

/// Screen-level check against an optional session.
///
/// An empty query passes with or without a session; anything else needs one.
pub fn screen_gate(session: Option<&Session>, query: &AuthorizationQuery) -> AuthorizationResult {
    match session {
        Some(session) => session.evaluator().check(query),
        None => AuthorizationResult::from_granted(query.is_empty()),
    }
}

/// Runs before a route's view mounts.
///
/// Never fails: decode errors and expiry both mean "unauthenticated".
#[derive(Debug)]
pub struct RouteGuard<S> {
    auth: Authenticator<S>,
    config: ConsoleConfig,
}

impl<S: SessionStore> RouteGuard<S> {
    pub fn new(store: S, config: ConsoleConfig) -> Self {
        Self {
            auth: Authenticator::new(store, &config),
            config,
        }
    }

    pub fn authenticator(&self) -> &Authenticator<S> {
        &self.auth
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Decide what happens when entering a route with the given access.
    pub fn resolve(&self, access: RouteAccess, now: Timestamp) -> GuardDecision {
        let session = self.auth.current(now);

        let outcome = match (access, session.is_some()) {
            (RouteAccess::Public, _) => GuardOutcome::Proceed,
            (RouteAccess::Login, true) => GuardOutcome::RedirectToHome,
            (RouteAccess::Login, false) => GuardOutcome::Proceed,
            (RouteAccess::Protected, true) => GuardOutcome::Proceed,
            (RouteAccess::Protected, false) => GuardOutcome::RedirectToLogin,
        };

        tracing::debug!(?access, ?outcome, "route guard evaluated");
        GuardDecision { outcome, session }
    }

    /// Resolve `route` and perform any redirect through `navigator`.
    pub fn enter<N>(&self, route: &Route, now: Timestamp, navigator: &N) -> GuardDecision
    where
        N: Navigator + ?Sized,
    {
        let decision = self.resolve(route.access, now);
        self.redirect(decision.outcome, &route.path, navigator);
        decision
    }

    /// Navigate to `outcome`'s target, if it has one. Returns whether it did.
    pub fn redirect<N>(&self, outcome: GuardOutcome, from: &str, navigator: &N) -> bool
    where
        N: Navigator + ?Sized,
    {
        match outcome.redirect_target(&self.config) {
            Some(target) => {
                tracing::debug!(from, to = target, "redirecting");
                navigator.redirect(target);
                true
            }
            None => false,
        }
    }

    /// Does `route`'s content render under `decision`?
    pub fn gate(&self, decision: &GuardDecision, route: &Route) -> AuthorizationResult {
        decision.screen(route)
    }
}
