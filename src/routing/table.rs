//! Immutable route table.
//!
//! # Design Decisions
//! - Built once by [`RouteRegistry`](crate::routing::RouteRegistry), never mutated
//! - Order is priority: the matcher walks it front to back
//! - Shared across requests behind `Arc` without locking

use std::fmt;
use std::sync::Arc;

use axum::http::Method;

use crate::dispatch::Handler;
use crate::routing::pattern::RoutePattern;
use crate::value::Value;

/// One registered endpoint.
pub struct RouteDescriptor {
    /// Route identifier, used for exclusion, logging and metrics.
    pub name: String,
    pub method: Method,
    pub pattern: RoutePattern,
    /// Module the route was registered under.
    pub module: String,
    pub description: String,
    pub tags: Vec<String>,
    pub(crate) handler: Arc<dyn Handler>,
}

impl RouteDescriptor {
    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    /// Public summary shown by the listing endpoint.
    pub fn summary(&self) -> Value {
        Value::map([
            ("name", Value::from(self.name.as_str())),
            ("method", Value::from(self.method.as_str())),
            ("path", Value::from(self.pattern.untyped())),
            ("descr", Value::from(self.description.as_str())),
        ])
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern.to_string())
            .field("module", &self.module)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Ordered, read-only collection of routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub(crate) fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Summaries of every route, in table order.
    pub fn summaries(&self) -> Value {
        Value::List(self.routes.iter().map(RouteDescriptor::summary).collect())
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteDescriptor;
    type IntoIter = std::slice::Iter<'a, RouteDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
