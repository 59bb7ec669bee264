//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Build route table → Start listener
//!
//! Shutdown (signals.rs → http::HttpServer::run):
//!     SIGTERM/SIGINT → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then route table, then listener
//! - Route table is built before the listener binds (traffic only when ready)
//! - The signal future is handed straight to axum's graceful shutdown

pub mod signals;
