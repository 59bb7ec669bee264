//! Request extraction.
//!
//! # Responsibilities
//! - Decode the query string into ordered pairs
//! - Read the body into memory, bounded by `listener.max_body_size`
//! - Produce a transport-neutral [`dispatch::Request`](crate::dispatch::Request)
//!
//! # Design Decisions
//! - An empty body is treated as no body
//! - Oversized bodies are refused before dispatch (413)

use axum::body::Body;
use axum::extract::Query;
use axum::http::StatusCode;

use crate::dispatch::{DispatchError, ParamError, Request, Response};

/// Why an HTTP request could not be turned into a dispatch request.
#[derive(Debug)]
pub enum ExtractError {
    Query(String),
    BodyTooLarge,
}

impl ExtractError {
    pub fn into_response(self) -> Response {
        match self {
            ExtractError::Query(reason) => {
                tracing::warn!(reason = %reason, "Bad request");
                DispatchError::from(ParamError::Query(reason)).into_response()
            }
            ExtractError::BodyTooLarge => Response::raw(
                StatusCode::PAYLOAD_TOO_LARGE,
                Default::default(),
                axum::body::Bytes::from_static(b"\"Payload Too Large\""),
            ),
        }
    }
}

/// Convert an incoming HTTP request.
pub async fn extract(request: axum::extract::Request<Body>, max_body_size: usize) -> Result<Request, ExtractError> {
    let (parts, body) = request.into_parts();

    let query = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
        Ok(Query(pairs)) => pairs,
        Err(e) => return Err(ExtractError::Query(e.body_text())),
    };

    let bytes = axum::body::to_bytes(body, max_body_size)
        .await
        .map_err(|_| ExtractError::BodyTooLarge)?;

    Ok(Request {
        method: parts.method,
        path: parts.uri.path().to_string(),
        query,
        body: (!bytes.is_empty()).then_some(bytes),
    })
}
