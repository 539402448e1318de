//! NAR archive endpoints: `/nar/{fileHash}.nar.{compression}`.

use super::{body_stream, object_response};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use silo_core::{NarKey, ObjectKey};

/// Content type for NAR archives.
const NAR_CONTENT_TYPE: &str = "application/x-nix-nar";

/// Parse the path segment into a NAR key. An unparseable name can never
/// correspond to a stored object, so it reads as absent.
fn nar_key(file_name: &str) -> ApiResult<ObjectKey> {
    let key = NarKey::parse(file_name).map_err(|_| ApiError::NotFound(file_name.to_string()))?;
    Ok(ObjectKey::Nar(key))
}

/// GET /nar/{fileHash}.nar.{compression} - Download an archive.
pub async fn get_nar(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> ApiResult<Response> {
    let key = nar_key(&file_name)?;
    let permit = state.limiter.acquire().await?;
    let reader = state.store.read(&key).await?;
    Ok(object_response(reader, permit, NAR_CONTENT_TYPE))
}

/// HEAD /nar/{fileHash}.nar.{compression} - Existence check. Metadata-only,
/// bypasses the I/O limiter.
pub async fn head_nar(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> ApiResult<StatusCode> {
    let key = nar_key(&file_name)?;
    if state.store.exists(&key).await? {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::NotFound(key.to_string()))
    }
}

/// PUT /nar/{fileHash}.nar.{compression} - Upload an archive, overwriting
/// any previous object under the same key.
pub async fn put_nar(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
    body: Body,
) -> ApiResult<StatusCode> {
    let key = nar_key(&file_name)?;
    let _permit = state.limiter.acquire().await?;
    state.store.write(&key, body_stream(body)).await?;
    Ok(StatusCode::CREATED)
}
