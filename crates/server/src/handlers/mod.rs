//! HTTP request handlers.

pub mod misc;
pub mod nar;
pub mod narinfo;

pub use misc::*;
pub use nar::*;
pub use narinfo::*;

use axum::body::Body;
use axum::http::StatusCode;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use silo_storage::{ByteStream, IoPermit, ObjectReader, StorageError};

/// Adapt a request body into the storage byte stream type.
fn body_stream(body: Body) -> ByteStream {
    Box::pin(
        body.into_data_stream()
            .map(|chunk| chunk.map_err(|e| StorageError::Io(std::io::Error::other(e)))),
    )
}

/// Build a streaming 200 response for an object read.
///
/// The I/O permit rides with the body stream and frees once the client has
/// consumed the response or disconnected.
fn object_response(reader: ObjectReader, permit: IoPermit, content_type: &'static str) -> Response {
    let content_length = reader.len.to_string();
    let body = Body::from_stream(permit.attach(reader.stream));
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type),
            (CONTENT_LENGTH, content_length.as_str()),
        ],
        body,
    )
        .into_response()
}
