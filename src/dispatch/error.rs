//! Dispatch failures and the responses they become.

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

use crate::dispatch::params::ParamError;
use crate::dispatch::response::Response;
use crate::value::CodecError;

// Pre-encoded JSON strings; these must never fail to encode.
const NOT_FOUND_BODY: &str = "\"Not found.\"";
const BAD_REQUEST_BODY: &str = "\"Bad Request\"";
const INTERNAL_ERROR_BODY: &str = "\"Internal Server Error\"";

/// Why a request did not reach (or came back from) its handler cleanly.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no route matches {method} {path}")]
    RouteNotFound { method: Method, path: String },

    /// Answered exactly like `RouteNotFound`.
    #[error("route `{route}` rejected by filter")]
    FilterRejected { route: String },

    #[error("bad request: {0}")]
    BadRequest(#[from] ParamError),

    #[error("method {0} not allowed on the route listing")]
    RootMethod(Method),

    #[error("response encoding failed: {0}")]
    Encoding(#[from] CodecError),

    #[error("handler for route `{route}` panicked")]
    HandlerPanicked { route: String },
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::RouteNotFound { .. } | DispatchError::FilterRejected { .. } => StatusCode::NOT_FOUND,
            DispatchError::BadRequest(_) | DispatchError::RootMethod(_) => StatusCode::BAD_REQUEST,
            DispatchError::Encoding(_) | DispatchError::HandlerPanicked { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => NOT_FOUND_BODY,
            StatusCode::BAD_REQUEST => BAD_REQUEST_BODY,
            _ => INTERNAL_ERROR_BODY,
        }
    }

    pub fn into_response(self) -> Response {
        Response::raw(self.status(), HeaderMap::new(), Bytes::from_static(self.body().as_bytes()))
    }
}
