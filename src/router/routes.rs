use std::collections::BTreeMap;

/// Access rules attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// Only reachable with a session token.
    pub requires_auth: bool,
    /// Only reachable without a session token (login, register).
    pub guest_only: bool,
}

impl RouteMeta {
    pub const AUTH: Self = Self {
        requires_auth: true,
        guest_only: false,
    };

    pub const GUEST: Self = Self {
        requires_auth: false,
        guest_only: true,
    };
}

/// A named path pattern. Segments starting with `:` capture a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub meta: RouteMeta,
}

/// Result of matching a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: &'static str,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub meta: RouteMeta,
}

impl RouteMatch {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// The application's routes.
pub fn builtin_routes() -> Vec<RouteDef> {
    vec![
        RouteDef {
            name: "home",
            pattern: "/",
            meta: RouteMeta::AUTH,
        },
        RouteDef {
            name: "login",
            pattern: "/login",
            meta: RouteMeta::GUEST,
        },
        RouteDef {
            name: "register",
            pattern: "/register",
            meta: RouteMeta::GUEST,
        },
        RouteDef {
            name: "data.list",
            pattern: "/data",
            meta: RouteMeta::AUTH,
        },
        RouteDef {
            name: "data.create",
            pattern: "/data/create",
            meta: RouteMeta::AUTH,
        },
        RouteDef {
            name: "data.edit",
            pattern: "/data/:id/edit",
            meta: RouteMeta::AUTH,
        },
        RouteDef {
            name: "data.detail",
            pattern: "/data/:id/detail",
            meta: RouteMeta::AUTH,
        },
    ]
}

/// Ordered route table; the first matching definition wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(builtin_routes())
    }
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    /// Path of the route called `name`, if it has no parameters.
    pub fn path_of(&self, name: &str) -> Option<&'static str> {
        self.routes
            .iter()
            .find(|r| r.name == name && !r.pattern.contains(':'))
            .map(|r| r.pattern)
    }

    /// Match a concrete path. Query string and fragment are ignored, as is
    /// a trailing slash.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments = split_segments(path);

        self.routes.iter().find_map(|route| {
            let params = match_pattern(route.pattern, &segments)?;
            Some(RouteMatch {
                name: route.name,
                path: format!("/{}", segments.join("/")),
                params,
                meta: route.meta,
            })
        })
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let expected = split_segments(pattern);
    if expected.len() != segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (want, got) in expected.iter().zip(segments) {
        match want.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), (*got).to_string());
            }
            None if want == got => {}
            None => return None,
        }
    }
    Some(params)
}
