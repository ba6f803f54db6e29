//! Session token storage.
//!
//! The token lives under the single key `token`. Stores are injected into
//! the transport and the session container instead of being read from
//! ambient global state.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Errors raised by token persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access token file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token file '{path}' is malformed: {message}")]
    Format { path: PathBuf, message: String },
}

/// Persistent home of the session token.
pub trait TokenStore: Send + Sync {
    /// Current token, if any.
    fn load(&self) -> Result<Option<SecureString>, StorageError>;

    /// Replace the stored token.
    fn save(&self, token: &SecureString) -> Result<(), StorageError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local token store.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecureString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SecureString::new(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SecureString>, StorageError> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &SecureString) -> Result<(), StorageError> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.lock() = None;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Token store backed by a small TOML file.
///
/// Reads take a shared lock and writes an exclusive one so that two
/// processes sharing the file never observe a half-written token.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write(&self, contents: &TokenFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let serialized = toml::to_string(contents).map_err(|e| StorageError::Format {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.lock_exclusive().map_err(|e| self.io_error(e))?;
        let result = file
            .set_len(0)
            .and_then(|_| file.seek(SeekFrom::Start(0)))
            .and_then(|_| file.write_all(serialized.as_bytes()))
            .and_then(|_| file.flush());
        let _ = FileExt::unlock(&file);
        result.map_err(|e| self.io_error(e))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SecureString>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut file = OpenOptions::new()
            .read(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.lock_shared().map_err(|e| self.io_error(e))?;
        let mut content = String::new();
        let read = file.read_to_string(&mut content);
        let _ = FileExt::unlock(&file);
        read.map_err(|e| self.io_error(e))?;

        let parsed: TokenFile = toml::from_str(&content).map_err(|e| StorageError::Format {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        Ok(parsed
            .token
            .filter(|t| !t.is_empty())
            .map(SecureString::new))
    }

    fn save(&self, token: &SecureString) -> Result<(), StorageError> {
        self.write(&TokenFile {
            token: Some(token.expose().to_string()),
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.write(&TokenFile::default())
    }
}
