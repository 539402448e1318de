//! Recovery and request-log middleware.
//!
//! Together with the auth layer these form the interceptor chain composed
//! once at startup: recovery, then authentication, then request logging,
//! then the operation handler.

use crate::error::ApiError;
use crate::operation::Operation;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// Catch panics raised during request handling and convert them into a
/// generic 500 so a single faulty request never takes the process down or
/// leaks internal state to the client.
pub async fn recover_middleware(req: Request, next: Next) -> Response {
    let operation = Operation::classify(req.method(), req.uri().path())
        .map(Operation::name)
        .unwrap_or("unknown");

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            tracing::error!(
                operation,
                panic = %panic_message(panic.as_ref()),
                "panic while handling request"
            );
            ApiError::Internal("internal server error".to_string()).into_response()
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Log every inbound operation at debug level. Purely observational, never
/// alters control flow.
pub async fn request_log_middleware(req: Request, next: Next) -> Response {
    if let Some(operation) = Operation::classify(req.method(), req.uri().path()) {
        tracing::debug!(
            operation = operation.name(),
            method = %req.method(),
            path = req.uri().path(),
            "operation called"
        );
    }
    next.run(req).await
}
