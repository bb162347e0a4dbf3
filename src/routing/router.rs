//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching endpoint for request
//! - Fall back to static assets on no match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan (acceptable for the handful of routes here)
//! - Every request resolves to an endpoint; static serving is the
//!   explicit fallback rather than a NoMatch error

use axum::body::Body;
use axum::http::{Method, Request};

use crate::config::RoutesConfig;
use crate::routing::matcher::{
    AndMatcher, ExactPathMatcher, Matcher, MethodMatcher, PathPrefixMatcher,
};

/// The endpoint a request dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Forward to the mail-autoconfiguration upstream.
    AutoconfigProxy,
    /// Run the contact submission flow.
    ContactForm,
    /// Resolve against the static asset root.
    StaticAssets,
}

struct Route {
    matcher: Box<dyn Matcher>,
    endpoint: Endpoint,
}

/// Immutable dispatch table, compiled from configuration at startup.
pub struct EdgeRouter {
    routes: Vec<Route>,
}

impl EdgeRouter {
    /// Compile the dispatch table from route configuration.
    ///
    /// Order matters: autoconfig prefixes are checked before the contact
    /// endpoint, and the first match wins.
    pub fn from_config(config: &RoutesConfig) -> Self {
        let mut routes: Vec<Route> = Vec::new();

        for prefix in &config.autoconfig_prefixes {
            routes.push(Route {
                matcher: Box::new(PathPrefixMatcher::new(prefix.clone())),
                endpoint: Endpoint::AutoconfigProxy,
            });
        }

        routes.push(Route {
            matcher: Box::new(AndMatcher::new(vec![
                Box::new(ExactPathMatcher::new(config.contact_path.clone())),
                Box::new(MethodMatcher::new(Method::POST)),
            ])),
            endpoint: Endpoint::ContactForm,
        });

        Self { routes }
    }

    /// Dispatch a request to its endpoint. First match wins; requests
    /// matching no route resolve to static assets.
    pub fn dispatch(&self, req: &Request<Body>) -> Endpoint {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(req))
            .map(|route| route.endpoint)
            .unwrap_or(Endpoint::StaticAssets)
    }
}
