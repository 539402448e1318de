//! Application state shared across handlers.

use crate::auth::AuthPolicy;
use silo_core::config::AppConfig;
use silo_storage::{IoLimiter, ObjectStore};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Object store.
    pub store: Arc<dyn ObjectStore>,
    /// Data-path I/O limiter, shared by every NAR and narinfo transfer.
    pub limiter: IoLimiter,
    /// Credential policy.
    pub auth: AuthPolicy,
}

impl AppState {
    /// Create application state from validated configuration.
    ///
    /// Resolves the credential policy (reading password files) and sizes the
    /// I/O limiter. Fails on invalid configuration or unreadable password
    /// files.
    pub fn new(config: AppConfig, store: Arc<dyn ObjectStore>) -> silo_core::Result<Self> {
        config.validate()?;
        let auth = AuthPolicy::from_config(&config.auth)?;
        let limiter = IoLimiter::new(config.server.io_concurrency);

        if auth.enabled() {
            tracing::info!("basic authentication enabled");
        } else {
            tracing::warn!("no credentials configured, serving unauthenticated");
        }

        Ok(Self {
            config: Arc::new(config),
            store,
            limiter,
            auth,
        })
    }
}
