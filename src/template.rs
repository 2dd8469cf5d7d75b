//! Route templating
//!
//! Maps a logical route name (e.g. `apps`) plus parameters to a concrete
//! request path. Route paths use `:param` placeholders, as in
//! `/v3/apps/:guid/processes`.

use crate::error::{Error, Result};
use crate::types::Method;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

/// Regex for matching route placeholders: `:name`
static PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-zA-Z_][a-zA-Z0-9_]*)").unwrap());

/// Scratch URL used to percent-encode path segments
static SEGMENT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://route.invalid/").unwrap());

/// A single named route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Logical name used for lookup
    pub name: &'static str,
    /// HTTP method the route expects
    pub method: Method,
    /// Path template
    pub path: &'static str,
}

impl Route {
    pub const fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self { name, method, path }
    }

    /// Names of all placeholders in this route's path, in order
    pub fn params(&self) -> Vec<&'static str> {
        PARAM_REGEX
            .captures_iter(self.path)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Render the path, substituting every placeholder.
    ///
    /// Values are percent-encoded as a single path segment.
    pub fn render(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut missing = None;

        let rendered = PARAM_REGEX.replace_all(self.path, |cap: &Captures<'_>| {
            let name = &cap[1];
            match params.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => encode_segment(value),
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(param) => Err(Error::MissingRouteParam {
                route: self.name.to_string(),
                param,
            }),
            None => Ok(rendered.into_owned()),
        }
    }
}

/// A lookup table of named routes
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Find a route by name
    pub fn get(&self, name: &str) -> Result<&Route> {
        self.routes
            .iter()
            .find(|route| route.name == name)
            .ok_or_else(|| Error::UnknownRoute {
                name: name.to_string(),
            })
    }

    /// Resolve a route name and parameters into a path
    pub fn path(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        self.get(name)?.render(params)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Cloud Controller v3 routes
pub fn cc_routes() -> RouteTable {
    RouteTable::new(vec![
        Route::new("apps", Method::GET, "/v3/apps"),
        Route::new("app", Method::GET, "/v3/apps/:guid"),
        Route::new("app_processes", Method::GET, "/v3/apps/:guid/processes"),
        Route::new("processes", Method::GET, "/v3/processes"),
        Route::new("spaces", Method::GET, "/v3/spaces"),
    ])
}

/// UAA routes
pub fn uaa_routes() -> RouteTable {
    RouteTable::new(vec![Route::new(
        "refresh_token",
        Method::POST,
        "/oauth/token",
    )])
}

/// Percent-encode a value so it is safe to use as one path segment
fn encode_segment(value: &str) -> String {
    let mut scratch = SEGMENT_BASE.clone();
    if let Ok(mut segments) = scratch.path_segments_mut() {
        segments.clear().push(value);
    }
    scratch.path().trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_static_route() {
        let routes = cc_routes();
        assert_eq!(routes.path("apps", &[]).unwrap(), "/v3/apps");
    }

    #[test]
    fn test_param_substitution() {
        let routes = cc_routes();
        let path = routes
            .path("app_processes", &[("guid", "1ba69b01-e712")])
            .unwrap();
        assert_eq!(path, "/v3/apps/1ba69b01-e712/processes");
    }

    #[test_case("a b", "a%20b" ; "space")]
    #[test_case("a/b", "a%2Fb" ; "slash")]
    #[test_case("plain-guid", "plain-guid" ; "unreserved")]
    fn test_param_is_encoded(value: &str, expected: &str) {
        let path = cc_routes().path("app", &[("guid", value)]).unwrap();
        assert_eq!(path, format!("/v3/apps/{expected}"));
    }

    #[test]
    fn test_missing_param() {
        let err = cc_routes().path("app", &[]).unwrap_err();
        match err {
            Error::MissingRouteParam { route, param } => {
                assert_eq!(route, "app");
                assert_eq!(param, "guid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_route() {
        let err = cc_routes().path("droplets", &[]).unwrap_err();
        assert!(matches!(err, Error::UnknownRoute { ref name } if name == "droplets"));
    }

    #[test]
    fn test_route_params() {
        let routes = cc_routes();
        assert_eq!(routes.get("app_processes").unwrap().params(), vec!["guid"]);
        assert!(routes.get("apps").unwrap().params().is_empty());
    }

    #[test]
    fn test_uaa_routes() {
        let routes = uaa_routes();
        let route = routes.get("refresh_token").unwrap();
        assert_eq!(route.method, Method::POST);
        assert_eq!(route.path, "/oauth/token");
        assert_eq!(routes.len(), 1);
    }
}
