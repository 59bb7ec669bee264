//! Response writing.
//!
//! # Responsibilities
//! - Turn a dispatch [`Response`] into an HTTP response
//! - Stream files named by `File` results with the handler's headers
//!
//! # Design Decisions
//! - A file that cannot be opened is a 404 when missing, otherwise a 500
//! - The open handle moves into the response body and is read in fixed-size
//!   chunks; it is closed when the body finishes or is dropped, including a
//!   client disconnecting mid-transfer

use std::io::{self, ErrorKind};
use std::path::Path;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use futures_util::stream;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::dispatch::response::merge_headers;
use crate::dispatch::{Response, ResponseBody};

const FILE_CHUNK_SIZE: usize = 64 * 1024;

/// Convert a dispatcher response into an axum response.
pub async fn into_http(response: Response) -> axum::response::Response {
    let Response { status, headers, body } = response;

    match body {
        ResponseBody::Bytes(bytes) => build(status, headers, Body::from(bytes)),
        ResponseBody::File(path) => match open_file(&path).await {
            Ok(file) => build(status, headers, Body::from_stream(stream::try_unfold(file, next_chunk))),
            Err(status) => error_response(status),
        },
    }
}

async fn open_file(path: &Path) -> Result<File, StatusCode> {
    File::open(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), "File result points at a missing file");
            StatusCode::NOT_FOUND
        } else {
            tracing::error!(path = %path.display(), error = %e, "Failed to open file result");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })
}

async fn next_chunk(mut file: File) -> io::Result<Option<(Bytes, File)>> {
    let mut buf = vec![0; FILE_CHUNK_SIZE];
    let n = file.read(&mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    buf.truncate(n);
    Ok(Some((Bytes::from(buf), file)))
}

fn error_response(status: StatusCode) -> axum::response::Response {
    let text: &'static [u8] = match status {
        StatusCode::NOT_FOUND => b"\"Not found.\"",
        _ => b"\"Internal Server Error\"",
    };
    build(status, merge_headers(HeaderMap::new()), Body::from(Bytes::from_static(text)))
}

fn build(status: StatusCode, headers: HeaderMap, body: Body) -> axum::response::Response {
    let mut http = axum::response::Response::new(body);
    *http.status_mut() = status;
    *http.headers_mut() = headers;
    http
}
