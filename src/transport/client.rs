use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::timeout;

use crate::config::{ApiConfig, TokenStore};
use crate::transport::error::{extract_message, ApiError};

const EVENT_BUFFER: usize = 16;
const JSON: &str = "application/json";

/// Session-level events raised by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the credential. The stored token is gone and the
    /// host should navigate to its login location.
    Unauthorized,
}

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutConfig {
    pub connect: Duration,
    pub request: Duration,
}

impl From<&ApiConfig> for TimeoutConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            connect: Duration::from_secs(u64::from(api.connect_timeout_seconds)),
            request: Duration::from_secs(u64::from(api.timeout_seconds)),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

/// HTTP transport shared by all resource clients.
///
/// Cloning is cheap; clones share the connection pool, token store and
/// event channel.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

struct TransportInner {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    events: broadcast::Sender<SessionEvent>,
    timeouts: TimeoutConfig,
}

impl Transport {
    pub fn new(api: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let timeouts = TimeoutConfig::from(api);
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(ApiError::Network)?;
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        Ok(Self {
            inner: Arc::new(TransportInner {
                client,
                base_url: api.base_url.trim_end_matches('/').to_string(),
                tokens,
                events,
                timeouts,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Token store the bearer credential is read from.
    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.inner.tokens)
    }

    /// Subscribe to session events (e.g. unauthorized responses).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut builder = self.request(Method::GET, path)?;
        if let Some(query) = query {
            builder = builder.query(query);
        }
        let response = self.execute(Method::GET, path, builder).await?;
        decode(response).await
    }

    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(Method::POST, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.execute(Method::POST, path, builder).await?;
        decode(response).await
    }

    /// POST whose response body is ignored.
    pub async fn post_empty<B>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(Method::POST, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(Method::POST, path, builder).await?;
        Ok(())
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path)?.json(body);
        let response = self.execute(Method::PUT, path, builder).await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path)?;
        self.execute(Method::DELETE, path, builder).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut builder = self
            .inner
            .client
            .request(method, url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON);

        // Read on every request so a login/logout elsewhere takes effect
        // without rebuilding the transport.
        if let Some(token) = self.inner.tokens.load()? {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose()));
        }

        Ok(builder)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let limit = self.inner.timeouts.request;
        let response = match timeout(limit, builder.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(method = %method, path = %path, error = %e, "API request failed");
                return Err(ApiError::Network(e));
            }
            Err(_) => {
                tracing::warn!(method = %method, path = %path, "API request timed out");
                return Err(ApiError::Timeout {
                    duration: limit.as_secs(),
                });
            }
        };

        let status = response.status();
        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            "API request completed"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized {
                message: message.unwrap_or_else(|| "Unauthenticated.".to_string()),
            });
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
            body,
        })
    }

    fn handle_unauthorized(&self) {
        tracing::warn!("Credential rejected by server, clearing stored token");
        if let Err(e) = self.inner.tokens.clear() {
            tracing::error!(error = %e, "Failed to clear stored token");
        }
        // No subscribers is fine.
        let _ = self.inner.events.send(SessionEvent::Unauthorized);
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(ApiError::Network)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
