//! Console session configuration.

use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_STORAGE_KEY;

pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_HOME_ROUTE: &str = "/home";

/// Entry points and session policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Storage slot holding the raw token.
    pub storage_key: String,

    /// Where unauthenticated users are sent.
    pub login_route: String,

    /// Landing page for authenticated users.
    pub home_route: String,

    /// Treat tokens without `exp` as unusable. Off by default: such tokens
    /// are accepted and never expire.
    pub require_expiry: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            home_route: DEFAULT_HOME_ROUTE.to_string(),
            require_expiry: false,
        }
    }
}

impl ConsoleConfig {
    /// Read overrides from `CONSOLE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = non_empty(lookup("CONSOLE_STORAGE_KEY")) {
            config.storage_key = key;
        }
        if let Some(route) = non_empty(lookup("CONSOLE_LOGIN_ROUTE")) {
            config.login_route = route;
        }
        if let Some(route) = non_empty(lookup("CONSOLE_HOME_ROUTE")) {
            config.home_route = route;
        }
        if let Some(raw) = lookup("CONSOLE_REQUIRE_EXPIRY") {
            match raw.trim().parse::<bool>() {
                Ok(value) => config.require_expiry = value,
                Err(_) => tracing::warn!(
                    value = %raw,
                    "CONSOLE_REQUIRE_EXPIRY is not a boolean; keeping {}",
                    config.require_expiry
                ),
            }
        }

        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
