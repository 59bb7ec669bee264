//! Startup route registration.
//!
//! Applications declare their routes explicitly, grouped by module:
//!
//! ```
//! use axum::http::Method;
//! use route_dispatch::dispatch::{HandlerResult, Params};
//! use route_dispatch::routing::{Bindings, RouteRecord, RouteRegistry};
//!
//! let mut registry = RouteRegistry::new();
//! registry
//!     .module("users")
//!     .route(
//!         RouteRecord::new("get_user", Method::GET, "/users/:id:int").describe("Fetch a user"),
//!         |b: &Bindings, _: &Params| HandlerResult::body(b.to_value()),
//!     );
//! let table = registry.build(&[]).unwrap();
//! assert_eq!(table.len(), 1);
//! ```
//!
//! Registration order becomes table order, which is match priority.

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::Method;
use thiserror::Error;

use crate::dispatch::Handler;
use crate::routing::pattern::{BindingKind, PatternError, RoutePattern, Segment};
use crate::routing::symbols::SymbolTable;
use crate::routing::table::{RouteDescriptor, RouteTable};

/// Errors raised while freezing the route table.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("route `{route}` has an invalid path: {source}")]
    InvalidPattern {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error("route `{route}` binds `{name}` more than once")]
    DuplicateBinding { route: String, name: String },
}

/// Raw route attributes, as an application declares them.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub name: String,
    pub method: Method,
    pub path: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl RouteRecord {
    pub fn new(name: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

struct Registered {
    module: String,
    record: RouteRecord,
    handler: Arc<dyn Handler>,
}

/// Collects route records and handlers before the table is frozen.
#[derive(Default)]
pub struct RouteRegistry {
    routes: Vec<Registered>,
    symbols: Vec<String>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register routes under a module name.
    pub fn module(&mut self, name: impl Into<String>) -> ModuleRoutes<'_> {
        ModuleRoutes {
            registry: self,
            module: name.into(),
        }
    }

    /// Declare symbols that `atom` bindings may resolve to.
    ///
    /// Symbols from configuration belong here too, before [`build`](Self::build).
    pub fn symbols<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(names.into_iter().map(Into::into));
        self
    }

    /// Symbol table holding every declared symbol.
    pub fn symbol_table(&self) -> SymbolTable {
        self.symbols.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Freeze into an ordered table, dropping routes named in `excluded`.
    pub fn build(&self, excluded: &[String]) -> Result<RouteTable, RegistryError> {
        let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
        let mut descriptors = Vec::with_capacity(self.routes.len());

        for entry in &self.routes {
            let record = &entry.record;
            if excluded.contains(record.name.as_str()) {
                tracing::debug!(route = %record.name, "Route excluded by configuration");
                continue;
            }

            let pattern = RoutePattern::parse(&record.path).map_err(|source| RegistryError::InvalidPattern {
                route: record.name.clone(),
                source,
            })?;
            check_bindings(&record.name, &pattern)?;

            if self.lacks_symbols(&pattern) {
                tracing::warn!(route = %record.name, "Route uses atom bindings but no symbols are registered");
            }

            descriptors.push(RouteDescriptor {
                name: record.name.clone(),
                method: record.method.clone(),
                pattern,
                module: entry.module.clone(),
                description: record.description.clone(),
                tags: record.tags.clone(),
                handler: Arc::clone(&entry.handler),
            });
        }

        tracing::info!(
            registered = self.routes.len(),
            active = descriptors.len(),
            "Route table built"
        );
        Ok(RouteTable::new(descriptors))
    }

    fn lacks_symbols(&self, pattern: &RoutePattern) -> bool {
        self.symbols.is_empty() && uses_atoms(pattern)
    }
}

/// Route registration scoped to one module.
pub struct ModuleRoutes<'r> {
    registry: &'r mut RouteRegistry,
    module: String,
}

impl ModuleRoutes<'_> {
    pub fn route<H>(&mut self, record: RouteRecord, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.registry.routes.push(Registered {
            module: self.module.clone(),
            record,
            handler: Arc::new(handler),
        });
        self
    }
}

fn check_bindings(route: &str, pattern: &RoutePattern) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for name in pattern.binding_names() {
        if !seen.insert(name) {
            return Err(RegistryError::DuplicateBinding {
                route: route.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn uses_atoms(pattern: &RoutePattern) -> bool {
    pattern
        .segments()
        .iter()
        .any(|s| matches!(s, Segment::Binding { kind: BindingKind::Atom, .. }))
}
