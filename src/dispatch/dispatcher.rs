//! Request dispatch.
//!
//! # Request State Machine
//! ```text
//! Start → MethodCheck ─┬─ "/" ──→ RootListing ───────────────────────────→ Done
//!                      │              └─ non-GET → 400
//!                      └─ other → RouteMatch → Filter? → ParamParse → HandlerInvoke → ResponseMap → Done
//!                                     └─ 404       └─ 404      └─ 400
//! ```
//!
//! # Design Decisions
//! - Synchronous and stateless per call; the table, symbols and filter are
//!   shared read-only across every concurrent dispatch
//! - Every failure becomes a response here; nothing escapes to the transport
//! - Handler panics are caught at this boundary and answered with 500

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use axum::http::{Method, StatusCode};

use crate::dispatch::error::DispatchError;
use crate::dispatch::filter::RouteFilter;
use crate::dispatch::params::Params;
use crate::dispatch::request::Request;
use crate::dispatch::response::Response;
use crate::observability::metrics;
use crate::routing::{match_route, RouteMatch, RouteTable, SymbolTable};
use crate::value::Value;

const LISTING_ROUTE: &str = "listing";
const NO_ROUTE: &str = "none";

/// Routes requests through an immutable table to their handlers.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
    symbols: Arc<SymbolTable>,
    filter: Option<Arc<dyn RouteFilter>>,
}

impl Dispatcher {
    pub fn new(table: RouteTable, symbols: SymbolTable) -> Self {
        Self {
            table: Arc::new(table),
            symbols: Arc::new(symbols),
            filter: None,
        }
    }

    /// Install an admission filter, checked after every successful match.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: RouteFilter + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Dispatch one request. Always produces a response.
    pub fn dispatch(&self, request: &Request) -> Response {
        let start = Instant::now();

        if is_root(&request.path) {
            let result = self.listing(&request.method);
            return self.finish(request, LISTING_ROUTE, start, result);
        }

        let matched = match self.resolve(request) {
            Ok(m) => m,
            Err(e) => return self.finish(request, NO_ROUTE, start, Err(e)),
        };
        let route = matched.route;
        let result = self.invoke(request, matched);
        self.finish(request, &route.name, start, result)
    }

    /// `GET /`: summaries of every route in the table.
    fn listing(&self, method: &Method) -> Result<Response, DispatchError> {
        if method != Method::GET {
            return Err(DispatchError::RootMethod(method.clone()));
        }
        let body = Value::map([("code", Value::Int(0)), ("data", self.table.summaries())]);
        Ok(Response::json(StatusCode::OK, &body)?)
    }

    fn resolve(&self, request: &Request) -> Result<RouteMatch<'_>, DispatchError> {
        let matched = match_route(&request.method, &request.path, &self.table, &self.symbols).ok_or_else(|| {
            DispatchError::RouteNotFound {
                method: request.method.clone(),
                path: request.path.clone(),
            }
        })?;

        if let Some(filter) = &self.filter {
            if !filter.allows(matched.route) {
                return Err(DispatchError::FilterRejected {
                    route: matched.route.name.clone(),
                });
            }
        }

        tracing::debug!(route = %matched.route.name, bindings = matched.bindings.len(), "Route matched");
        Ok(matched)
    }

    fn invoke(&self, request: &Request, matched: RouteMatch<'_>) -> Result<Response, DispatchError> {
        let body = if request.has_body() { request.body.as_deref() } else { None };
        let params = Params::parse(&request.query, body)?;

        let RouteMatch { route, bindings } = matched;
        let result = catch_unwind(AssertUnwindSafe(|| route.handler().call(&bindings, &params))).map_err(|_| {
            DispatchError::HandlerPanicked {
                route: route.name.clone(),
            }
        })?;

        Ok(result.into_response()?)
    }

    fn finish(
        &self,
        request: &Request,
        route: &str,
        start: Instant,
        result: Result<Response, DispatchError>,
    ) -> Response {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    DispatchError::RouteNotFound { .. } | DispatchError::FilterRejected { .. } => {
                        tracing::debug!(method = %request.method, path = %request.path, reason = %e, "Not found");
                    }
                    DispatchError::BadRequest(_) | DispatchError::RootMethod(_) => {
                        tracing::warn!(method = %request.method, path = %request.path, reason = %e, "Bad request");
                    }
                    DispatchError::Encoding(_) | DispatchError::HandlerPanicked { .. } => {
                        tracing::error!(method = %request.method, path = %request.path, route = %route, error = %e, "Dispatch failed");
                    }
                }
                e.into_response()
            }
        };

        metrics::record_dispatch(request.method.as_str(), response.status.as_u16(), route, start);
        response
    }
}

fn is_root(path: &str) -> bool {
    path.is_empty() || path == "/"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::HandlerResult;
    use crate::routing::{Bindings, RouteRecord, RouteRegistry};

    fn dispatcher() -> Dispatcher {
        let mut registry = RouteRegistry::new();
        registry.symbols(["active"]);
        registry
            .module("users")
            .route(
                RouteRecord::new("get_user", Method::GET, "/users/:id:int").describe("Fetch a user"),
                |b: &Bindings, _: &Params| HandlerResult::body(b.to_value()),
            )
            .route(
                RouteRecord::new("by_state", Method::GET, "/users/state/:s:atom"),
                |b: &Bindings, _: &Params| HandlerResult::body(b.to_value()),
            )
            .route(
                RouteRecord::new("panics", Method::GET, "/boom"),
                |_: &Bindings, _: &Params| -> HandlerResult { panic!("handler bug") },
            )
            .route(
                RouteRecord::new("nan", Method::GET, "/nan"),
                |_: &Bindings, _: &Params| HandlerResult::body(Value::Float(f64::NAN)),
            );
        let symbols = registry.symbol_table();
        Dispatcher::new(registry.build(&[]).unwrap(), symbols)
    }

    fn body(resp: &Response) -> &[u8] {
        resp.bytes().map(|b| b.as_ref()).unwrap_or_default()
    }

    #[test]
    fn test_dispatch_binds_int() {
        let resp = dispatcher().dispatch(&Request::new(Method::GET, "/users/42"));
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(body(&resp), br#"{"id":42}"#);
    }

    #[test]
    fn test_dispatch_non_numeric_is_404() {
        let resp = dispatcher().dispatch(&Request::new(Method::GET, "/users/abc"));
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(body(&resp), b"\"Not found.\"");
    }

    #[test]
    fn test_unknown_atom_is_404() {
        let d = dispatcher();
        assert_eq!(d.dispatch(&Request::new(Method::GET, "/users/state/active")).status, StatusCode::OK);
        assert_eq!(d.dispatch(&Request::new(Method::GET, "/users/state/gone")).status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_root_listing_and_method() {
        let d = dispatcher();
        let resp = d.dispatch(&Request::new(Method::GET, "/"));
        assert_eq!(resp.status, StatusCode::OK);
        let listing = crate::value::decode(body(&resp)).unwrap();
        let listing = crate::value::to_canonical(listing);
        let map = listing.as_map().unwrap();
        assert_eq!(map.get("code"), Some(&Value::Int(0)));
        match map.get("data") {
            Some(Value::List(items)) => {
                assert_eq!(items.len(), 4);
                let first = items[0].as_map().unwrap();
                assert_eq!(first.get("path"), Some(&Value::from("/users/:id")));
                assert_eq!(first.get("method"), Some(&Value::from("GET")));
                assert_eq!(first.get("descr"), Some(&Value::from("Fetch a user")));
            }
            other => panic!("unexpected data: {other:?}"),
        }

        let resp = d.dispatch(&Request::new(Method::POST, "/"));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_handler_panic_is_500() {
        let resp = dispatcher().dispatch(&Request::new(Method::GET, "/boom"));
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_encoding_failure_is_500() {
        let resp = dispatcher().dispatch(&Request::new(Method::GET, "/nan"));
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(&resp), b"\"Internal Server Error\"");
    }

    #[test]
    fn test_filter_rejects_as_not_found() {
        let d = dispatcher().with_filter(|_: &crate::routing::RouteDescriptor| false);
        let resp = d.dispatch(&Request::new(Method::GET, "/users/1"));
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(body(&resp), b"\"Not found.\"");

        // The listing ignores the filter.
        assert_eq!(d.dispatch(&Request::new(Method::GET, "/")).status, StatusCode::OK);
    }
}
