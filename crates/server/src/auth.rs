//! Basic-Auth policy middleware.
//!
//! Two optional credential pairs are loaded at startup: read and write.
//! When both are unset, authentication is disabled entirely. Otherwise the
//! two upload operations require the write pair exactly, and every other
//! guarded operation accepts either pair; with no read pair configured,
//! those read-tier operations pass unauthenticated. Rejections happen here,
//! before the request reaches any handler or the object store.

use crate::error::ApiError;
use crate::operation::{AuthTier, Operation};
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use base64::{Engine as _, engine::general_purpose};
use silo_core::Credentials;
use silo_core::config::AuthConfig;

/// Immutable credential policy, resolved once at startup.
#[derive(Clone, Default)]
pub struct AuthPolicy {
    read: Option<Credentials>,
    write: Option<Credentials>,
}

impl AuthPolicy {
    pub fn new(read: Option<Credentials>, write: Option<Credentials>) -> Self {
        Self { read, write }
    }

    /// Build from configuration, reading password files as needed.
    pub fn from_config(config: &AuthConfig) -> silo_core::Result<Self> {
        let read = config.read.as_ref().map(|c| c.resolve()).transpose()?;
        let write = config.write.as_ref().map(|c| c.resolve()).transpose()?;
        Ok(Self::new(read.flatten(), write.flatten()))
    }

    /// Whether any credentials are configured at all.
    pub fn enabled(&self) -> bool {
        self.read.is_some() || self.write.is_some()
    }

    /// Check an operation against the supplied `Authorization` header value.
    pub fn authorize(&self, operation: Operation, header: Option<&str>) -> Result<(), ApiError> {
        if !self.enabled() || operation.tier() == AuthTier::Open {
            return Ok(());
        }

        // A write-only configuration guards uploads only: with no read pair
        // configured, read-tier operations pass unchecked.
        if operation.tier() == AuthTier::Read && self.read.is_none() {
            return Ok(());
        }

        let (user, password) = decode_basic(header).ok_or(ApiError::AuthMalformed)?;

        let write_matches = self
            .write
            .as_ref()
            .is_some_and(|c| c.matches(&user, &password));
        let matched = match operation.tier() {
            AuthTier::Open => true,
            AuthTier::Write => write_matches,
            AuthTier::Read => {
                write_matches
                    || self
                        .read
                        .as_ref()
                        .is_some_and(|c| c.matches(&user, &password))
            }
        };

        if matched { Ok(()) } else { Err(ApiError::AuthRejected) }
    }
}

/// Decode an HTTP Basic `Authorization` header into `(user, password)`.
/// Per RFC 7617 the scheme name is case-insensitive.
fn decode_basic(header: Option<&str>) -> Option<(String, String)> {
    let value = header?;
    if value.len() < 6 || !value[..6].eq_ignore_ascii_case("basic ") {
        return None;
    }
    let decoded = general_purpose::STANDARD.decode(value[6..].trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Authentication middleware applied around every operation handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(operation) = Operation::classify(req.method(), req.uri().path()) {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        state.auth.authorize(operation, header)?;
    }
    Ok(next.run(req).await)
}
