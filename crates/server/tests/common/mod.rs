//! Server test utilities.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use silo_core::config::{AppConfig, CredentialConfig};
use silo_server::{AppState, create_router};
use silo_storage::{FsStore, ObjectStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// A test server wrapper with temporary storage.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: Router,
    pub store_root: PathBuf,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a test server with default (unauthenticated) config.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let store_root = temp_dir.path().join("store");

        let mut config = AppConfig::default();
        config.store.root = store_root.clone();
        modifier(&mut config);

        let store: Arc<dyn ObjectStore> = Arc::new(
            FsStore::new(&config.store.root)
                .await
                .expect("Failed to create object store"),
        );
        let state = AppState::new(config, store).expect("Failed to build state");
        let router = create_router(state);

        Self {
            router,
            store_root,
            _temp_dir: temp_dir,
        }
    }
}

/// Build a credential pair for config modifiers.
#[allow(dead_code)]
pub fn credential(user: &str, password: &str) -> CredentialConfig {
    CredentialConfig {
        user: user.to_string(),
        password: Some(password.to_string()),
        password_file: None,
    }
}

/// Encode a Basic `Authorization` header value.
#[allow(dead_code)]
pub fn basic_auth(user: &str, password: &str) -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{user}:{password}"))
    )
}

/// Issue a request against the router and collect the response.
#[allow(dead_code)]
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&[u8]>,
    auth: Option<&str>,
) -> (StatusCode, HeaderMap, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth {
        builder = builder.header("Authorization", value);
    }

    let body = match body {
        Some(bytes) => Body::from(bytes.to_vec()),
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, bytes)
}
