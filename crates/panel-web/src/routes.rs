//! Fixed route table and path matching.
//!
//! Routes are named mappings from an HTTP method + path pattern to a
//! handler. A pattern may contain at most one `{variable}` segment, bound
//! to the matching path segment at resolve time. Route identity is the
//! name, compared case-insensitively.
//!
//! Matching is path-only: a request whose path matches a route but whose
//! method has no handler still resolves, and falls through the dispatch
//! table as an explicit unhandled default.

use axum::http::Method;
use axum::Router;

use crate::dispatch::dispatch;
use crate::error::RouteError;
use crate::AppState;

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    /// Route name, unique within the table (case-insensitive).
    pub name: &'static str,
    /// Path pattern relative to the base path, e.g. `helloworld/{data}`.
    pub pattern: &'static str,
    /// Methods this route handles.
    pub methods: &'static [Method],
}

/// A resolved route for one inbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// The matched route's name.
    pub name: &'static str,
    /// The bound `{variable}` (name, value), if the pattern has one.
    pub variable: Option<(String, String)>,
}

/// The route table registered once per server start.
#[derive(Debug, Default)]
pub struct RouteTable {
    /// Base path segments prefixed to every pattern.
    base: Vec<String>,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table with the given base path (empty = root).
    pub fn new(base_path: &str) -> Self {
        Self {
            base: base_path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            routes: Vec::new(),
        }
    }

    /// The standard table of the panel bridge.
    pub fn standard(base_path: &str) -> Self {
        let mut table = Self::new(base_path);
        for route in [
            Route {
                name: "HELLOWORLD",
                pattern: "helloworld/{data}",
                methods: &[Method::GET],
            },
            Route {
                name: "holamundo",
                pattern: "holamundo",
                methods: &[Method::POST],
            },
            Route {
                name: "interlockstatus",
                pattern: "interlockstatus",
                methods: &[Method::GET],
            },
            Route {
                name: "getslider",
                pattern: "getslider",
                methods: &[Method::GET],
            },
            Route {
                name: "postslider",
                pattern: "postslider",
                methods: &[Method::POST],
            },
            Route {
                name: "log",
                pattern: "log",
                methods: &[Method::GET],
            },
        ] {
            table
                .add(route)
                .expect("standard route table has unique names");
        }
        table
    }

    /// Register a route. Names must be unique, case-insensitively;
    /// duplicate patterns are the listener's concern, not checked here.
    pub fn add(&mut self, route: Route) -> Result<(), RouteError> {
        if self
            .routes
            .iter()
            .any(|r| r.name.eq_ignore_ascii_case(route.name))
        {
            return Err(RouteError::DuplicateName(route.name));
        }
        self.routes.push(route);
        Ok(())
    }

    /// The registered routes, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a request path against the table.
    ///
    /// Returns the first route whose pattern matches, with its variable
    /// bound, or `None` for unrecognized paths.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let got: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.routes.iter().find_map(|route| {
            self.match_route(route, &got).map(|variable| RouteMatch {
                name: route.name,
                variable,
            })
        })
    }

    /// Match one route; `Some(binding)` on success.
    fn match_route(&self, route: &Route, got: &[&str]) -> Option<Option<(String, String)>> {
        let want: Vec<&str> = self
            .base
            .iter()
            .map(String::as_str)
            .chain(route.pattern.split('/'))
            .collect();
        if want.len() != got.len() {
            return None;
        }

        let mut variable = None;
        for (want, got) in want.iter().zip(got) {
            match want.strip_prefix('{').and_then(|w| w.strip_suffix('}')) {
                Some(name) => variable = Some((name.to_string(), (*got).to_string())),
                None if want.eq_ignore_ascii_case(got) => {}
                None => return None,
            }
        }
        Some(variable)
    }
}

/// Create the Axum router over the shared state.
///
/// Everything funnels through the dispatch fallback so the controller owns
/// route resolution, the help fallback, and pass-through semantics.
pub fn create_router(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_route() {
        let table = RouteTable::standard("");
        let m = table.resolve("/getslider").unwrap();
        assert_eq!(m.name, "getslider");
        assert_eq!(m.variable, None);
    }

    #[test]
    fn test_resolve_binds_variable() {
        let table = RouteTable::standard("");
        let m = table.resolve("/helloworld/Atlanta").unwrap();
        assert_eq!(m.name, "HELLOWORLD");
        assert_eq!(
            m.variable,
            Some(("data".to_string(), "Atlanta".to_string()))
        );
    }

    #[test]
    fn test_resolve_unknown_path() {
        let table = RouteTable::standard("");
        assert!(table.resolve("/nope").is_none());
        assert!(table.resolve("/").is_none());
        assert!(table.resolve("/helloworld").is_none());
        assert!(table.resolve("/helloworld/a/b").is_none());
    }

    #[test]
    fn test_resolve_literal_segments_case_insensitive() {
        let table = RouteTable::standard("");
        assert_eq!(table.resolve("/GetSlider").unwrap().name, "getslider");
    }

    #[test]
    fn test_base_path_prefixes_every_pattern() {
        let table = RouteTable::standard("cws");
        assert!(table.resolve("/getslider").is_none());
        assert_eq!(table.resolve("/cws/getslider").unwrap().name, "getslider");

        let m = table.resolve("/cws/helloworld/hey").unwrap();
        assert_eq!(m.variable, Some(("data".to_string(), "hey".to_string())));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut table = RouteTable::standard("");
        let err = table
            .add(Route {
                name: "Log",
                pattern: "log2",
                methods: &[Method::GET],
            })
            .unwrap_err();
        assert!(matches!(err, RouteError::DuplicateName("Log")));
    }

    #[test]
    fn test_standard_table_has_six_routes() {
        let table = RouteTable::standard("");
        assert_eq!(table.routes().len(), 6);
    }
}
