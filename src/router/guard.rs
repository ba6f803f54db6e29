use std::sync::Arc;

use crate::router::routes::{RouteMatch, RouteTable};
use crate::store::SessionStore;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Decision for a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(RouteMatch),
    Redirect(String),
    NotFound,
}

/// Gates navigation on session presence.
pub struct NavigationGuard {
    routes: RouteTable,
    session: Arc<SessionStore>,
}

impl NavigationGuard {
    pub fn new(routes: RouteTable, session: Arc<SessionStore>) -> Self {
        Self { routes, session }
    }

    /// Decide where a navigation to `to` ends up.
    ///
    /// The session is first reconciled with the token store, so a token
    /// revoked by an earlier 401 counts as signed out. A token without a
    /// loaded user is then validated; `fetch_user` drops the token when the
    /// server no longer accepts it.
    pub async fn before_each(&self, to: &str) -> Navigation {
        self.session.sync_with_storage();
        if self.session.user().is_none() && self.session.has_token() {
            self.session.fetch_user().await;
        }

        let Some(matched) = self.routes.resolve(to) else {
            tracing::debug!(path = %to, "No route matches");
            return Navigation::NotFound;
        };

        let has_token = self.session.has_token();
        if matched.meta.requires_auth && !has_token {
            tracing::debug!(route = matched.name, "Route requires a session, redirecting");
            return Navigation::Redirect(LOGIN_PATH.to_string());
        }
        if matched.meta.guest_only && has_token {
            tracing::debug!(route = matched.name, "Route is guest-only, redirecting");
            return Navigation::Redirect(HOME_PATH.to_string());
        }

        Navigation::Proceed(matched)
    }
}
