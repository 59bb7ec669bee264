//! Generic JSON values and their normalization.
//!
//! # Data Flow
//! ```text
//! request body bytes
//!     → codec.rs (decode: objects become ordered Pairs, `{}` becomes [Pairs[]])
//!     → normalize.rs (to_canonical: Pairs folded into Map)
//!     → handler params
//!
//! handler body (canonical Value)
//!     → normalize.rs (to_ordered_pairs)
//!     → codec.rs (encode)
//!     → response bytes
//! ```
//!
//! # Design Decisions
//! - One sum type covers both the wire shape (`Pairs`) and the canonical
//!   shape (`Map`/`List`); normalization is exhaustive matching, not shape sniffing
//! - Both transforms are total over well-formed input
//! - `Map` is a `BTreeMap` so canonical values compare and encode deterministically

pub mod codec;
pub mod normalize;

use std::collections::BTreeMap;

pub use codec::{decode, encode, CodecError};
pub use normalize::{to_canonical, to_ordered_pairs};

/// A JSON value in either ordered-pairs or canonical shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Object as decoded from the wire: insertion order kept, duplicates allowed.
    Pairs(Vec<(String, Value)>),
    List(Vec<Value>),
    /// Canonical object.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// The decoded form of `{}`: a list holding one empty pairs marker.
    pub fn empty_object() -> Self {
        Value::List(vec![Value::Pairs(Vec::new())])
    }

    pub fn is_empty_object_marker(&self) -> bool {
        matches!(self, Value::List(items) if items.len() == 1 && matches!(&items[0], Value::Pairs(p) if p.is_empty()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Build a canonical map from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an ordered-pairs object from key/value pairs.
    pub fn pairs<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Pairs(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}
