//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Request (method, path, query, body)
//!     → dispatcher.rs ("/" listing, or route match via routing::matcher)
//!     → filter.rs (optional admission check)
//!     → params.rs (query + normalized JSON body)
//!     → handler.rs (route handler call)
//!     → result.rs (HandlerResult → status/headers/body)
//!     → Response
//! ```
//!
//! Failures along the way become responses through error.rs.

pub mod dispatcher;
pub mod error;
pub mod filter;
pub mod handler;
pub mod params;
pub mod request;
pub mod response;
pub mod result;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use filter::{RouteFilter, TagFilter};
pub use handler::Handler;
pub use params::{ParamError, Params};
pub use request::Request;
pub use response::{Response, ResponseBody};
pub use result::HandlerResult;
