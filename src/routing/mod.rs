//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     RouteRecord[] per module
//!     → registry.rs (drop excluded names, tokenize paths)
//!     → pattern.rs (literal / typed binding segments)
//!     → Freeze as immutable RouteTable
//!
//! Incoming Request (method, path)
//!     → matcher.rs (walk table in order, segment-by-segment)
//!     → symbols.rs (resolve atom bindings)
//!     → Return: RouteMatch { route, bindings } or None
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (table order is priority)

pub mod bindings;
pub mod matcher;
pub mod pattern;
pub mod registry;
pub mod symbols;
pub mod table;

pub use bindings::{Bindings, Bound};
pub use matcher::{match_route, CoerceError, RouteMatch};
pub use pattern::{BindingKind, PatternError, RoutePattern, Segment};
pub use registry::{ModuleRoutes, RegistryError, RouteRecord, RouteRegistry};
pub use symbols::{Symbol, SymbolTable};
pub use table::{RouteDescriptor, RouteTable};
