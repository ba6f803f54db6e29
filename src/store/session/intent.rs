use crate::api::User;
use crate::config::SecureString;
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SessionIntent {
    /// Login/registration attempt started. Clears `error`.
    RequestStarted,
    RequestFinished,
    Authenticated { user: User, token: SecureString },
    UserLoaded { user: User },
    /// Logout, rejected token or failed user lookup.
    SignedOut,
    Failed { message: String },
}

impl Intent for SessionIntent {}
