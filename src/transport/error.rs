//! Error types for calls against the remote service.

use thiserror::Error;

use crate::config::StorageError;

/// Errors surfaced by the transport and the resource clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (DNS, connect, reset, ...).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request exceeded the configured total timeout.
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Server answered 401. The stored token has already been cleared.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-2xx response, surfaced unchanged.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// `message` field of the JSON body, when present.
        message: Option<String>,
        body: String,
    },

    /// 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Token persistence failed.
    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Human-readable message for display: the server's `message` when it
    /// sent one, otherwise the generic failure text.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Unauthorized { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Error type string for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network_error",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::Status { .. } => "status_error",
            ApiError::Decode(_) => "decode_error",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

/// Pull the `message` string out of a JSON error body.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
