//! Route path templates.
//!
//! A template such as `/users/:id:int/posts/:slug` is split on `/` into
//! literal and binding segments. Empty segments are ignored, so leading,
//! trailing and doubled slashes do not matter.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How a bound path segment is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// Looked up in the application's symbol table.
    Atom,
    /// Decimal integer.
    Int,
    /// Raw segment text. Default when no type is given.
    Binary,
}

impl FromStr for BindingKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "atom" => Ok(BindingKind::Atom),
            "int" => Ok(BindingKind::Int),
            "binary" => Ok(BindingKind::Binary),
            other => Err(PatternError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BindingKind::Atom => "atom",
            BindingKind::Int => "int",
            BindingKind::Binary => "binary",
        })
    }
}

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Binding { name: String, kind: BindingKind },
}

/// Errors in a route template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown binding type `{0}` (expected atom, int or binary)")]
    UnknownKind(String),

    #[error("binding in segment `{0}` has no name")]
    EmptyName(String),

    #[error("malformed binding segment `{0}`")]
    Malformed(String),
}

/// A tokenized route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Tokenize a template.
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the template with type annotations stripped (`:id:int` → `:id`).
    pub fn untyped(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Binding { name, .. } => {
                    out.push(':');
                    out.push_str(name);
                }
            }
        }
        out
    }

    /// Names of all bindings, in path order.
    pub fn binding_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Binding { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl FromStr for RoutePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => write!(f, "/{text}")?,
                Segment::Binding { name, kind: BindingKind::Binary } => write!(f, "/:{name}")?,
                Segment::Binding { name, kind } => write!(f, "/:{name}:{kind}")?,
            }
        }
        Ok(())
    }
}

fn parse_segment(raw: &str) -> Result<Segment, PatternError> {
    let Some(binding) = raw.strip_prefix(':') else {
        return Ok(Segment::Literal(raw.to_string()));
    };

    let mut parts = binding.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let kind = match parts.next() {
        Some(kind) => kind.parse()?,
        None => BindingKind::Binary,
    };
    if parts.next().is_some() {
        return Err(PatternError::Malformed(raw.to_string()));
    }
    if name.is_empty() {
        return Err(PatternError::EmptyName(raw.to_string()));
    }

    Ok(Segment::Binding {
        name: name.to_string(),
        kind,
    })
}
