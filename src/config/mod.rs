//! Configuration loading and credential storage.

mod credentials;
mod loader;
mod types;

pub use credentials::{FileTokenStore, MemoryTokenStore, SecureString, StorageError, TokenStore};
pub use loader::ConfigError;
pub use types::{ApiConfig, Config, ListConfig, StorageConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
