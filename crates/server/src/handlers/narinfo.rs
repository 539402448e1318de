//! narinfo manifest endpoints: `/{storePathHash}.narinfo`.
//!
//! These paths are served from the router fallback because axum doesn't
//! support `/{param}.suffix` route patterns. The fallback also owns the
//! `/{storePathHash}.ls` listing stub.

use super::{body_stream, object_response};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use silo_core::{ObjectKey, StorePathHash};

/// Content type for narinfo manifests.
const NARINFO_CONTENT_TYPE: &str = "text/x-nix-narinfo";

/// Parse a store path hash into a manifest key. Invalid hashes read as
/// absent; they can never correspond to a stored object.
fn narinfo_key(hash: &str) -> ApiResult<ObjectKey> {
    let hash = StorePathHash::new(hash).map_err(|_| ApiError::NotFound(hash.to_string()))?;
    Ok(ObjectKey::NarInfo(hash))
}

/// Fallback handler covering `/{storePathHash}.narinfo` (GET/HEAD/PUT) and
/// `/{storePathHash}.ls` (GET). Anything else is a plain 404.
pub async fn store_path_fallback(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_string();
    let Some(name) = path.strip_prefix('/').filter(|p| !p.contains('/')) else {
        return ApiError::NotFound(path.clone()).into_response();
    };

    if let Some(hash) = name.strip_suffix(".narinfo") {
        let hash = hash.to_string();
        let method = req.method().clone();
        let result = if method == Method::GET {
            get_narinfo(&state, &hash).await
        } else if method == Method::HEAD {
            head_narinfo(&state, &hash).await
        } else if method == Method::PUT {
            put_narinfo(&state, &hash, req).await
        } else {
            Err(ApiError::NotFound(path.clone()))
        };
        return result.unwrap_or_else(IntoResponse::into_response);
    }

    if name.ends_with(".ls") {
        // Only GET is a listing request; other methods on `.ls` names are
        // unroutable and must not reach the unimplemented answer.
        if req.method() == Method::GET {
            tracing::warn!(name, "NAR file listing requested");
            return ApiError::Unimplemented("NAR file listings").into_response();
        }
        return ApiError::NotFound(path.clone()).into_response();
    }

    ApiError::NotFound(path.clone()).into_response()
}

/// GET /{storePathHash}.narinfo - Download a manifest.
async fn get_narinfo(state: &AppState, hash: &str) -> ApiResult<Response> {
    let key = narinfo_key(hash)?;
    let permit = state.limiter.acquire().await?;
    let reader = state.store.read(&key).await?;
    Ok(object_response(reader, permit, NARINFO_CONTENT_TYPE))
}

/// HEAD /{storePathHash}.narinfo - Existence check. Metadata-only, bypasses
/// the I/O limiter.
async fn head_narinfo(state: &AppState, hash: &str) -> ApiResult<Response> {
    let key = narinfo_key(hash)?;
    if state.store.exists(&key).await? {
        Ok(StatusCode::OK.into_response())
    } else {
        Err(ApiError::NotFound(key.to_string()))
    }
}

/// PUT /{storePathHash}.narinfo - Upload a manifest, overwriting any
/// previous object under the same key.
async fn put_narinfo(state: &AppState, hash: &str, req: Request) -> ApiResult<Response> {
    let key = narinfo_key(hash)?;
    let _permit = state.limiter.acquire().await?;
    state
        .store
        .write(&key, body_stream(req.into_body()))
        .await?;
    Ok(StatusCode::CREATED.into_response())
}
