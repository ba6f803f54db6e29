//! Route table and navigation guard.

mod guard;
mod routes;

pub use guard::{Navigation, NavigationGuard, HOME_PATH, LOGIN_PATH};
pub use routes::{builtin_routes, RouteDef, RouteMatch, RouteMeta, RouteTable};
