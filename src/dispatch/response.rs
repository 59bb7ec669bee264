//! Dispatcher output: status, headers and either bytes or a file to send.

use std::path::PathBuf;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

use crate::value::{encode, CodecError, Value};

pub const APPLICATION_JSON: &str = "application/json";

/// What the transport writes after the headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Bytes(Bytes),
    /// Send the file at this path instead of an in-memory body.
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl Response {
    /// JSON-encode `value` with the default headers.
    pub fn json(status: StatusCode, value: &Value) -> Result<Self, CodecError> {
        let bytes = encode(value)?;
        Ok(Self::raw(status, HeaderMap::new(), Bytes::from(bytes)))
    }

    /// Already-encoded body; `headers` are merged over the defaults.
    pub fn raw(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers: merge_headers(headers),
            body: ResponseBody::Bytes(body),
        }
    }

    pub fn file(headers: HeaderMap, path: PathBuf) -> Self {
        Self {
            status: StatusCode::OK,
            headers,
            body: ResponseBody::File(path),
        }
    }

    /// In-memory body bytes, if this is not a file response.
    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.body {
            ResponseBody::Bytes(b) => Some(b),
            ResponseBody::File(_) => None,
        }
    }
}

/// Default `content-type: application/json`, overridden by `custom`.
pub fn merge_headers(custom: HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    headers.extend(custom);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_headers_overrides_default() {
        let mut custom = HeaderMap::new();
        custom.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        custom.insert("x-extra", HeaderValue::from_static("1"));

        let merged = merge_headers(custom);
        assert_eq!(merged.get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(merged.get("x-extra").unwrap(), "1");
        assert_eq!(merged.get_all(header::CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn test_json_response_has_default_content_type() {
        let resp = Response::json(StatusCode::OK, &Value::from("ok")).unwrap();
        assert_eq!(resp.headers.get(header::CONTENT_TYPE).unwrap(), APPLICATION_JSON);
        assert_eq!(resp.bytes().unwrap().as_ref(), b"\"ok\"");
    }
}
