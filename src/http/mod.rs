//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: trace, timeout, request ID)
//!     → request.rs (query pairs, bounded body read)
//!     → dispatch::Dispatcher (route, filter, params, handler)
//!     → response.rs (status/headers/body, file results read from disk)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
