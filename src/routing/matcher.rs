//! Route matching logic.
//!
//! # Responsibilities
//! - Skip routes whose method differs from the request method
//! - Walk request path segments against the route pattern
//! - Coerce bound segments to their declared type
//!
//! # Design Decisions
//! - Literal matching is exact and case-sensitive
//! - A coercion failure (bad integer, unknown symbol) is a non-match for
//!   that route only; the walk continues with the next route
//! - First match in table order wins
//! - No regex, no backtracking: O(routes × segments)

use std::num::IntErrorKind;

use axum::http::Method;
use thiserror::Error;

use crate::routing::bindings::{Bindings, Bound};
use crate::routing::pattern::{BindingKind, RoutePattern, Segment};
use crate::routing::symbols::SymbolTable;
use crate::routing::table::{RouteDescriptor, RouteTable};

/// Why a bound segment could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("segment `{value}` bound to `{name}` is not an integer")]
    NotAnInteger { name: String, value: String },

    #[error("segment `{value}` bound to `{name}` is outside the 64-bit integer range")]
    IntOutOfRange { name: String, value: String },

    #[error("segment `{value}` bound to `{name}` is not a known symbol")]
    UnknownSymbol { name: String, value: String },
}

/// A route selected for a request, with its path bindings.
#[derive(Debug)]
pub struct RouteMatch<'t> {
    pub route: &'t RouteDescriptor,
    pub bindings: Bindings,
}

/// Find the first route in `table` matching `method` and `path`.
pub fn match_route<'t>(
    method: &Method,
    path: &str,
    table: &'t RouteTable,
    symbols: &SymbolTable,
) -> Option<RouteMatch<'t>> {
    let segments: Vec<&str> = tokenize(path).collect();

    for route in table.iter().filter(|r| r.method == *method) {
        match match_pattern(&route.pattern, &segments, symbols) {
            Ok(Some(bindings)) => return Some(RouteMatch { route, bindings }),
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(route = %route.name, error = %e, "Binding coercion failed, trying next route");
            }
        }
    }

    None
}

/// Match pre-split path segments against one pattern.
///
/// `Ok(None)` is a structural mismatch (length or literal), `Err` a failed
/// coercion. Both mean "this pattern does not match".
pub fn match_pattern(
    pattern: &RoutePattern,
    segments: &[&str],
    symbols: &SymbolTable,
) -> Result<Option<Bindings>, CoerceError> {
    if pattern.segments().len() != segments.len() {
        return Ok(None);
    }

    let mut bindings = Bindings::new();
    for (expected, actual) in pattern.segments().iter().zip(segments) {
        match expected {
            Segment::Literal(text) => {
                if text != actual {
                    return Ok(None);
                }
            }
            Segment::Binding { name, kind } => {
                let value = coerce(name, *kind, actual, symbols)?;
                bindings.insert(name, value);
            }
        }
    }

    Ok(Some(bindings))
}

/// Split a request path on `/`, dropping empty segments.
pub fn tokenize(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn coerce(name: &str, kind: BindingKind, raw: &str, symbols: &SymbolTable) -> Result<Bound, CoerceError> {
    match kind {
        BindingKind::Binary => Ok(Bound::Text(raw.to_string())),
        BindingKind::Int => raw.parse().map(Bound::Int).map_err(|e: std::num::ParseIntError| {
            let (name, value) = (name.to_string(), raw.to_string());
            match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoerceError::IntOutOfRange { name, value },
                _ => CoerceError::NotAnInteger { name, value },
            }
        }),
        BindingKind::Atom => symbols.lookup(raw).map(Bound::Atom).ok_or_else(|| CoerceError::UnknownSymbol {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::HandlerResult;
    use crate::routing::registry::{RouteRecord, RouteRegistry};

    fn table(routes: &[(&str, Method, &str)]) -> RouteTable {
        let mut registry = RouteRegistry::new();
        for (name, method, path) in routes {
            registry.module("test").route(
                RouteRecord::new(*name, method.clone(), *path),
                |_: &Bindings, _: &crate::dispatch::Params| HandlerResult::Ok,
            );
        }
        registry.build(&[]).unwrap()
    }

    fn symbols() -> SymbolTable {
        ["active", "archived"].into_iter().collect()
    }

    #[test]
    fn test_int_binding() {
        let t = table(&[("user", Method::GET, "/users/:id:int")]);
        let m = match_route(&Method::GET, "/users/42", &t, &symbols()).unwrap();
        assert_eq!(m.route.name, "user");
        assert_eq!(m.bindings.int("id"), Some(42));

        assert!(match_route(&Method::GET, "/users/abc", &t, &symbols()).is_none());
    }

    #[test]
    fn test_method_must_match() {
        let t = table(&[("user", Method::GET, "/users/:id")]);
        assert!(match_route(&Method::POST, "/users/1", &t, &symbols()).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let t = table(&[
            ("by_id", Method::GET, "/items/:id"),
            ("latest", Method::GET, "/items/latest"),
        ]);
        let m = match_route(&Method::GET, "/items/latest", &t, &symbols()).unwrap();
        assert_eq!(m.route.name, "by_id");
        assert_eq!(m.bindings.text("id"), Some("latest"));
    }

    #[test]
    fn test_coercion_failure_falls_through() {
        let t = table(&[
            ("numeric", Method::GET, "/items/:id:int"),
            ("by_state", Method::GET, "/items/:state:atom"),
            ("raw", Method::GET, "/items/:anything"),
        ]);
        let m = match_route(&Method::GET, "/items/7", &t, &symbols()).unwrap();
        assert_eq!(m.route.name, "numeric");

        let m = match_route(&Method::GET, "/items/archived", &t, &symbols()).unwrap();
        assert_eq!(m.route.name, "by_state");
        assert_eq!(m.bindings.atom("state").map(|s| s.as_str()), Some("archived"));

        let m = match_route(&Method::GET, "/items/unknown", &t, &symbols()).unwrap();
        assert_eq!(m.route.name, "raw");
    }

    #[test]
    fn test_length_and_literal_mismatch() {
        let t = table(&[("nested", Method::GET, "/a/:x/c")]);
        assert!(match_route(&Method::GET, "/a/b", &t, &symbols()).is_none());
        assert!(match_route(&Method::GET, "/a/b/c/d", &t, &symbols()).is_none());
        assert!(match_route(&Method::GET, "/a/b/C", &t, &symbols()).is_none());
        assert!(match_route(&Method::GET, "/a/b/c/", &t, &symbols()).is_some());
    }

    #[test]
    fn test_match_pattern_reports_coercion_error() {
        let pattern = RoutePattern::parse("/s/:state:atom").unwrap();
        let err = match_pattern(&pattern, &["s", "gone"], &symbols()).unwrap_err();
        assert_eq!(
            err,
            CoerceError::UnknownSymbol { name: "state".into(), value: "gone".into() }
        );
    }

    #[test]
    fn test_int_overflow_is_reported_as_out_of_range() {
        let pattern = RoutePattern::parse("/users/:id:int").unwrap();

        let err = match_pattern(&pattern, &["users", "99999999999999999999"], &symbols()).unwrap_err();
        assert!(matches!(err, CoerceError::IntOutOfRange { ref name, .. } if name == "id"));
        assert!(err.to_string().contains("outside the 64-bit integer range"));

        let err = match_pattern(&pattern, &["users", "abc"], &symbols()).unwrap_err();
        assert!(matches!(err, CoerceError::NotAnInteger { .. }));

        let t = table(&[("user", Method::GET, "/users/:id:int")]);
        assert!(match_route(&Method::GET, "/users/99999999999999999999", &t, &symbols()).is_none());
        let m = match_route(&Method::GET, "/users/-9223372036854775808", &t, &symbols()).unwrap();
        assert_eq!(m.bindings.int("id"), Some(i64::MIN));
    }
}
