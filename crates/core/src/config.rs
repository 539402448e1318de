//! Configuration types shared across crates.
//!
//! Loaded once at startup (TOML file merged with `SILO_`-prefixed environment
//! variables) into an immutable [`AppConfig`] that is passed by value into the
//! components that need it. No ambient global settings exist.

use crate::credentials::Credentials;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Validate cross-field constraints. Returns human-readable problems.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.io_concurrency == 0 {
            return Err(crate::Error::Config(
                "server.io_concurrency must be at least 1".to_string(),
            ));
        }
        if self.server.bind.is_empty() {
            return Err(crate::Error::Config(
                "server.bind must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8100").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Capacity of the data-path I/O limiter.
    #[serde(default = "default_io_concurrency")]
    pub io_concurrency: usize,
    /// Log filter directive (overridden by RUST_LOG if set).
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            io_concurrency: default_io_concurrency(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8100".to_string()
}

fn default_io_concurrency() -> usize {
    crate::DEFAULT_IO_CONCURRENCY
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Object store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory for stored objects.
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

fn default_store_root() -> PathBuf {
    PathBuf::from("/var/lib/silo")
}

/// Authentication configuration: optional read and write credential pairs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Read-tier credentials.
    pub read: Option<CredentialConfig>,
    /// Write-tier credentials.
    pub write: Option<CredentialConfig>,
}

/// One configured credential pair. The password may be inline or sourced from
/// a file (for secret managers that mount credentials as files).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Username. An empty username means the pair is unset.
    #[serde(default)]
    pub user: String,
    /// Inline password. Ignored when `password_file` is set.
    pub password: Option<String>,
    /// Path to a file holding the password. A single trailing newline is
    /// stripped, the rest of the content is taken verbatim.
    pub password_file: Option<PathBuf>,
}

impl CredentialConfig {
    /// Resolve into usable credentials, reading the password file if any.
    ///
    /// Returns `Ok(None)` when the username is empty (pair unset). A
    /// configured but unreadable password file is a hard error.
    pub fn resolve(&self) -> crate::Result<Option<Credentials>> {
        if self.user.is_empty() {
            return Ok(None);
        }
        let password = match &self.password_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| {
                    crate::Error::PasswordFile {
                        path: path.clone(),
                        source,
                    }
                })?;
                raw.strip_suffix('\n').unwrap_or(&raw).to_string()
            }
            None => self.password.clone().unwrap_or_default(),
        };
        Ok(Some(Credentials::new(&self.user, password)))
    }
}
