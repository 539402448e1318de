//! HTTP API server for the silo binary cache.
//!
//! This crate provides the request-handling layer:
//! - NAR and narinfo download, existence checks and upload
//! - Two-tier Basic-Auth policy (read / write)
//! - Panic recovery and request logging middleware
//! - Bounded data-path I/O via the shared limiter

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod operation;
pub mod routes;
pub mod state;

pub use auth::AuthPolicy;
pub use error::ApiError;
pub use operation::{AuthTier, Operation};
pub use routes::create_router;
pub use state::AppState;
