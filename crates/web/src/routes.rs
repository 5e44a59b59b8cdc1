//! Route declarations as seen by the guard.

use std::borrow::Cow;

use console_auth::AuthorizationQuery;

use crate::ConsoleConfig;

/// How a route relates to authentication.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable by anyone; the guard never redirects.
    Public,
    /// The login entry point; signed-in users are sent home.
    Login,
    /// Requires a usable session.
    Protected,
}

/// A route path plus what it takes to enter and to see its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: Cow<'static, str>,
    pub access: RouteAccess,
    /// Screen-level requirement checked after the guard lets the route load.
    pub requires: AuthorizationQuery,
}

impl Route {
    fn new(path: impl Into<Cow<'static, str>>, access: RouteAccess) -> Self {
        Self {
            path: path.into(),
            access,
            requires: AuthorizationQuery::new(),
        }
    }

    pub fn public(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(path, RouteAccess::Public)
    }

    pub fn login(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(path, RouteAccess::Login)
    }

    pub fn protected(path: impl Into<Cow<'static, str>>) -> Self {
        Self::new(path, RouteAccess::Protected)
    }

    pub fn requiring(mut self, query: AuthorizationQuery) -> Self {
        self.requires = query;
        self
    }

    /// Does `path` match this route? `:name` segments match any single segment.
    pub fn matches(&self, path: &str) -> bool {
        let mut pattern = segments(&self.path);
        let mut actual = segments(path);

        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return true,
                (Some(p), Some(a)) if p.starts_with(':') || p == a => continue,
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty())
}

/// Ordered set of routes; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with the configured login and home routes.
    pub fn with_entry_points(config: &ConsoleConfig) -> Self {
        Self::new()
            .with(Route::login(config.login_route.clone()))
            .with(Route::protected(config.home_route.clone()))
    }

    pub fn with(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_literal_and_param_segments() {
        let route = Route::protected("/clientes/:id/editar");
        assert!(route.matches("/clientes/42/editar"));
        assert!(route.matches("clientes/42/editar/"));
        assert!(!route.matches("/clientes/42"));
        assert!(!route.matches("/clientes/42/editar/extra"));
        assert!(!route.matches("/produtos/42/editar"));
    }

    #[test]
    fn ignores_query_and_fragment() {
        assert!(Route::public("/site").matches("/site?page=2#top"));
    }

    #[test]
    fn root_matches_only_root() {
        let root = Route::public("/");
        assert!(root.matches("/"));
        assert!(root.matches(""));
        assert!(!root.matches("/home"));
    }

    #[test]
    fn first_match_wins() {
        let table = RouteTable::with_entry_points(&ConsoleConfig::default())
            .with(Route::protected("/inventarios/novo"))
            .with(
                Route::protected("/inventarios/:id")
                    .requiring(AuthorizationQuery::capability("view_inventarios")),
            );

        assert_eq!(table.find("/login").map(|r| r.access), Some(RouteAccess::Login));
        assert_eq!(table.find("/home").map(|r| r.access), Some(RouteAccess::Protected));
        assert!(table.find("/inventarios/novo").unwrap().requires.is_empty());
        assert!(!table.find("/inventarios/9").unwrap().requires.is_empty());
        assert!(table.find("/nowhere").is_none());
        assert_eq!(table.routes().len(), 4);
    }
}
