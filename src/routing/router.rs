//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First match wins, in table order
//! - Explicit no-match rather than a silent default endpoint

use crate::config::RoutesConfig;
use crate::routing::matcher::{Matcher, PathSuffixMatcher};

/// Handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Fetch and convert a proxy list.
    Convert,
}

impl Endpoint {
    /// Label used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Convert => "convert",
        }
    }
}

/// A compiled route.
#[derive(Debug)]
pub struct Route {
    pub endpoint: Endpoint,
    matcher: Box<dyn Matcher>,
}

impl Route {
    pub fn new(endpoint: Endpoint, matcher: Box<dyn Matcher>) -> Self {
        Self { endpoint, matcher }
    }
}

/// Immutable route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Compile the route table from configuration.
    pub fn from_config(config: &RoutesConfig) -> Self {
        Self::new(vec![Route::new(
            Endpoint::Convert,
            Box::new(PathSuffixMatcher::new(config.convert_suffix.clone())),
        )])
    }

    /// Find the first route whose matcher accepts `path`.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let router = Router::from_config(&RoutesConfig::default());

        let route = router.match_path("/convert").unwrap();
        assert_eq!(route.endpoint, Endpoint::Convert);
        assert!(router.match_path("/workers/convert").is_some());
        assert!(router.match_path("/other").is_none());
    }

    #[test]
    fn test_configured_suffix() {
        let router = Router::from_config(&RoutesConfig {
            convert_suffix: "/shadowrocket".into(),
        });

        assert!(router.match_path("/convert").is_none());
        assert_eq!(router.match_path("/sub/shadowrocket").unwrap().endpoint, Endpoint::Convert);
    }
}
