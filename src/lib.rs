//! Request routing and dispatch for minimal JSON/REST services.
//!
//! A [`RouteRegistry`](routing::RouteRegistry) is filled at startup and frozen
//! into an ordered [`RouteTable`](routing::RouteTable). The
//! [`Dispatcher`](dispatch::Dispatcher) matches each request against it,
//! parses parameters through the [`value`] normalizer, calls the handler and
//! maps its [`HandlerResult`](dispatch::HandlerResult) to a response.
//! [`http`] serves a dispatcher over axum.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod value;

pub use config::DispatchConfig;
pub use dispatch::{Dispatcher, HandlerResult, Params, Request, Response};
pub use http::HttpServer;
pub use routing::{Bindings, RouteRecord, RouteRegistry};
pub use value::Value;
