use crate::api::User;
use crate::config::SecureString;
use crate::store::mvi::StoreState;

/// Snapshot of the session container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<SecureString>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl StoreState for SessionState {}

impl SessionState {
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}
