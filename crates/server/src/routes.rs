//! Route configuration.

use crate::auth::auth_middleware;
use crate::handlers;
use crate::middleware::{recover_middleware, request_log_middleware};
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Create the application router.
///
/// The interceptor chain is composed once here. Layers are applied in
/// reverse order (outermost first), so execution runs:
/// TraceLayer -> recovery -> auth -> request log -> handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/nix-cache-info", get(handlers::get_cache_info))
        .route(
            "/nar/{nar_file}",
            get(handlers::get_nar)
                .head(handlers::head_nar)
                .put(handlers::put_nar),
        )
        .route("/log/{deriver}", get(handlers::get_build_log))
        // Narinfo and listing routes use a fallback handler since axum
        // doesn't support /{param}.suffix patterns.
        .fallback(handlers::store_path_fallback)
        .layer(middleware::from_fn(request_log_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(middleware::from_fn(recover_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
