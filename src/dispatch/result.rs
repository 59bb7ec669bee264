//! Handler results and their HTTP mapping.

use std::path::PathBuf;

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};

use crate::dispatch::response::Response;
use crate::value::{to_canonical, CodecError, Value};

/// What a route handler hands back to the dispatcher.
#[derive(Debug, Clone)]
pub enum HandlerResult {
    /// `200` with the JSON text `"ok"`.
    Ok,
    /// `200` with a JSON-encoded body.
    Body(Value),
    /// `200` with a pre-encoded body sent as-is.
    Raw { headers: HeaderMap, body: Bytes },
    /// `500` with the reason JSON-encoded.
    Error(Value),
    Status { status: StatusCode, body: Value },
    StatusWithHeaders {
        status: StatusCode,
        headers: HeaderMap,
        body: Value,
    },
    /// `200` streaming the file at `path`.
    File { headers: HeaderMap, path: PathBuf },
}

impl HandlerResult {
    pub fn body(body: impl Into<Value>) -> Self {
        HandlerResult::Body(body.into())
    }

    pub fn error(reason: impl Into<Value>) -> Self {
        HandlerResult::Error(reason.into())
    }

    pub fn status(status: StatusCode, body: impl Into<Value>) -> Self {
        HandlerResult::Status {
            status,
            body: body.into(),
        }
    }

    pub fn raw(headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        HandlerResult::Raw {
            headers,
            body: body.into(),
        }
    }

    pub fn file(headers: HeaderMap, path: impl Into<PathBuf>) -> Self {
        HandlerResult::File {
            headers,
            path: path.into(),
        }
    }

    /// Map to a response. Fails only when a body cannot be JSON-encoded.
    pub fn into_response(self) -> Result<Response, CodecError> {
        match self {
            HandlerResult::Ok => Response::json(StatusCode::OK, &Value::from("ok")),
            HandlerResult::Body(body) => Response::json(StatusCode::OK, &to_canonical(body)),
            HandlerResult::Raw { headers, body } => Ok(Response::raw(StatusCode::OK, headers, body)),
            HandlerResult::Error(reason) => {
                Response::json(StatusCode::INTERNAL_SERVER_ERROR, &to_canonical(reason))
            }
            HandlerResult::Status { status, body } => Response::json(status, &to_canonical(body)),
            HandlerResult::StatusWithHeaders { status, headers, body } => {
                let encoded = crate::value::encode(&to_canonical(body))?;
                Ok(Response::raw(status, headers, Bytes::from(encoded)))
            }
            HandlerResult::File { headers, path } => Ok(Response::file(headers, path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::response::ResponseBody;
    use axum::http::{header, HeaderValue};

    fn body_of(resp: &Response) -> &[u8] {
        resp.bytes().map(|b| b.as_ref()).unwrap_or_default()
    }

    #[test]
    fn test_ok_is_json_text() {
        let resp = HandlerResult::Ok.into_response().unwrap();
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(body_of(&resp), b"\"ok\"");
    }

    #[test]
    fn test_body_is_encoded_canonically() {
        let body = Value::pairs([("b", Value::Int(1)), ("a", Value::empty_object())]);
        let resp = HandlerResult::body(body).into_response().unwrap();
        assert_eq!(body_of(&resp), br#"{"a":{},"b":1}"#);
    }

    #[test]
    fn test_raw_is_not_reencoded() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        let resp = HandlerResult::raw(headers, "a,b\n1,2\n").into_response().unwrap();
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.headers.get(header::CONTENT_TYPE).unwrap(), "text/csv");
        assert_eq!(body_of(&resp), b"a,b\n1,2\n");
    }

    #[test]
    fn test_error_is_500() {
        let resp = HandlerResult::error("db down").into_response().unwrap();
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(&resp), b"\"db down\"");
    }

    #[test]
    fn test_status_variants() {
        let resp = HandlerResult::status(StatusCode::CREATED, Value::Int(7))
            .into_response()
            .unwrap();
        assert_eq!(resp.status, StatusCode::CREATED);
        assert_eq!(body_of(&resp), b"7");

        let mut headers = HeaderMap::new();
        headers.insert(header::LOCATION, HeaderValue::from_static("/users/7"));
        let resp = HandlerResult::StatusWithHeaders {
            status: StatusCode::ACCEPTED,
            headers,
            body: Value::map([("id", Value::Int(7))]),
        }
        .into_response()
        .unwrap();
        assert_eq!(resp.status, StatusCode::ACCEPTED);
        assert_eq!(resp.headers.get(header::LOCATION).unwrap(), "/users/7");
        assert_eq!(resp.headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(body_of(&resp), br#"{"id":7}"#);
    }

    #[test]
    fn test_file_bypasses_encoding() {
        let resp = HandlerResult::file(HeaderMap::new(), "/tmp/report.pdf")
            .into_response()
            .unwrap();
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body, ResponseBody::File(PathBuf::from("/tmp/report.pdf")));
    }

    #[test]
    fn test_unencodable_body_fails() {
        let err = HandlerResult::body(Value::Float(f64::INFINITY)).into_response();
        assert!(err.is_err());
    }
}
