use crate::api::types::{AuthResponse, Credentials, Registration, User};
use crate::transport::{ApiError, Transport};

/// Client for the authentication endpoints.
#[derive(Clone)]
pub struct AuthApi {
    transport: Transport,
}

impl AuthApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// `POST /login`.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.transport.post("/login", Some(credentials)).await
    }

    /// `POST /register`.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.transport.post("/register", Some(registration)).await
    }

    /// `POST /logout`.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.transport.post_empty::<()>("/logout", None).await
    }

    /// `GET /user`.
    pub async fn user(&self) -> Result<User, ApiError> {
        self.transport.get::<_, ()>("/user", None).await
    }
}
