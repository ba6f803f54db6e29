use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::{AuthApi, AuthResponse, Credentials, Registration, User};
use crate::config::{SecureString, TokenStore};
use crate::store::mvi::Reducer;
use crate::store::session::intent::SessionIntent;
use crate::store::session::reducer::SessionReducer;
use crate::store::session::state::SessionState;
use crate::transport::ApiError;

/// State container for the signed-in user and their token.
///
/// The token is mirrored into the injected [`TokenStore`], which is the same
/// store the transport reads the bearer credential from.
pub struct SessionStore {
    api: AuthApi,
    tokens: Arc<dyn TokenStore>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Create the container, picking up a previously persisted token.
    pub fn new(api: AuthApi) -> Self {
        let tokens = api.transport().tokens();
        let token = tokens.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read stored token, starting signed out");
            None
        });

        Self {
            api,
            tokens,
            state: Mutex::new(SessionState {
                token,
                ..SessionState::default()
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.lock().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.lock().user.clone()
    }

    pub fn has_token(&self) -> bool {
        self.state.lock().has_token()
    }

    /// Sign in. Returns `false` and records `error` on failure.
    pub async fn login(&self, credentials: &Credentials) -> bool {
        let _loading = self.begin();
        let result = self.api.login(credentials).await;
        self.complete_auth("login", result)
    }

    /// Create an account and sign in. Returns `false` and records `error` on failure.
    pub async fn register(&self, registration: &Registration) -> bool {
        let _loading = self.begin();
        let result = self.api.register(registration).await;
        self.complete_auth("register", result)
    }

    /// Sign out on the server, then forget the session locally.
    ///
    /// A failed server call is logged and leaves the session untouched.
    pub async fn logout(&self) -> bool {
        match self.api.logout().await {
            Ok(()) => {
                self.forget();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Logout error");
                false
            }
        }
    }

    /// Load the current user when a token is present.
    ///
    /// A failed lookup means the token is no longer usable and it is dropped.
    pub async fn fetch_user(&self) {
        if !self.has_token() {
            return;
        }

        match self.api.user().await {
            Ok(user) => self.dispatch(SessionIntent::UserLoaded { user }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load current user, dropping token");
                self.forget();
            }
        }
    }

    /// React to the transport rejecting the credential.
    ///
    /// The transport already cleared the persisted token; this clears the
    /// in-memory copy and the user.
    pub fn handle_unauthorized(&self) {
        self.dispatch(SessionIntent::SignedOut);
    }

    /// Drop the in-memory session when the token store no longer holds a
    /// token, e.g. right after the transport saw a 401.
    pub fn sync_with_storage(&self) {
        if !self.has_token() {
            return;
        }
        match self.tokens.load() {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::debug!("Stored token is gone, signing out");
                self.dispatch(SessionIntent::SignedOut);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to read stored token"),
        }
    }

    fn complete_auth(&self, operation: &'static str, result: Result<AuthResponse, ApiError>) -> bool {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(operation, error = %e, "Authentication failed");
                self.dispatch(SessionIntent::Failed {
                    message: e.user_message(),
                });
                return false;
            }
        };

        let token = SecureString::new(response.token);
        if let Err(e) = self.tokens.save(&token) {
            tracing::error!(operation, error = %e, "Failed to persist token");
            self.dispatch(SessionIntent::Failed {
                message: e.to_string(),
            });
            return false;
        }

        tracing::info!(operation, user_id = response.user.id, "Signed in");
        self.dispatch(SessionIntent::Authenticated {
            user: response.user,
            token,
        });
        true
    }

    fn forget(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::error!(error = %e, "Failed to clear stored token");
        }
        self.dispatch(SessionIntent::SignedOut);
    }

    fn dispatch(&self, intent: SessionIntent) {
        let mut state = self.state.lock();
        let current = std::mem::take(&mut *state);
        *state = SessionReducer::reduce(current, intent);
    }

    fn begin(&self) -> scopeguard::ScopeGuard<(), impl FnOnce(()) + '_> {
        self.dispatch(SessionIntent::RequestStarted);
        scopeguard::guard((), move |_| self.dispatch(SessionIntent::RequestFinished))
    }
}
