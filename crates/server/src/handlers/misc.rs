//! Cache metadata and unimplemented pass-through endpoints.

use crate::error::{ApiError, ApiResult};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

/// Fixed `nix-cache-info` document, independent of store contents.
const NIX_CACHE_INFO: &str = "StoreDir: /nix/store\nWantMassQuery: 1\nPriority: 30\n";

/// GET /nix-cache-info - Standard Nix cache metadata.
pub async fn get_cache_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/x-nix-cache-info")],
        NIX_CACHE_INFO,
    )
}

/// GET /log/{deriver} - Build logs live in the build orchestrator, not in
/// this cache. Unconditionally 501.
pub async fn get_build_log(Path(deriver): Path<String>) -> ApiResult<Response> {
    tracing::warn!(%deriver, "build log requested");
    Err(ApiError::Unimplemented("build log retrieval"))
}
