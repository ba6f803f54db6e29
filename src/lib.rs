//! Client for a remote CRUD item service.
//!
//! ```text
//! Config ──→ TokenStore ──→ Transport ──→ ItemsApi / AuthApi
//!                               │               │
//!                        SessionEvent     ItemStore / SessionStore ──→ NavigationGuard
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod router;
pub mod store;
pub mod transport;

use std::sync::{Arc, Weak};

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::api::{AuthApi, ItemsApi};
use crate::config::{Config, TokenStore};
use crate::router::{NavigationGuard, RouteTable};
use crate::store::{ItemStore, SessionStore};
use crate::transport::{ApiError, SessionEvent, Transport};

/// Everything a host needs, wired against one transport.
pub struct Client {
    pub transport: Transport,
    pub items: Arc<ItemStore>,
    pub session: Arc<SessionStore>,
    pub guard: NavigationGuard,
    listener: JoinHandle<()>,
}

impl Client {
    /// Build the client. Unauthorized responses tear down both containers
    /// through a listener task, so this must run inside a tokio runtime.
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let transport = Transport::new(&config.api, tokens)?;
        let items = Arc::new(ItemStore::new(ItemsApi::new(transport.clone())));
        let session = Arc::new(SessionStore::new(AuthApi::new(transport.clone())));
        let listener = spawn_teardown_listener(
            Arc::downgrade(&session),
            Arc::downgrade(&items),
            transport.subscribe(),
        );
        let guard = NavigationGuard::new(RouteTable::default(), Arc::clone(&session));

        Ok(Self {
            transport,
            items,
            session,
            guard,
            listener,
        })
    }

    /// Sign out and drop the list that belonged to the session.
    ///
    /// A failed server call keeps both the session and the list.
    pub async fn logout(&self) -> bool {
        if !self.session.logout().await {
            return false;
        }
        self.items.reset();
        true
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// Clear the session and the item list on [`SessionEvent::Unauthorized`].
///
/// Holds weak references only; exits once either container is gone or the
/// channel closes.
fn spawn_teardown_listener(
    session: Weak<SessionStore>,
    items: Weak<ItemStore>,
    mut events: broadcast::Receiver<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::Unauthorized) => {
                    let (Some(session), Some(items)) = (session.upgrade(), items.upgrade()) else {
                        break;
                    };
                    session.handle_unauthorized();
                    items.reset();
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Session event listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
