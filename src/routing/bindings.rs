//! Typed values extracted from a matched path.

use std::collections::HashMap;

use crate::routing::symbols::Symbol;
use crate::value::Value;

/// A coerced path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Atom(Symbol),
    Int(i64),
    Text(String),
}

impl Bound {
    /// JSON view of the bound value.
    pub fn to_value(&self) -> Value {
        match self {
            Bound::Atom(s) => Value::Text(s.as_str().to_string()),
            Bound::Int(i) => Value::Int(*i),
            Bound::Text(t) => Value::Text(t.clone()),
        }
    }
}

/// Binding name → value for one matched request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, Bound>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &str, value: Bound) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Bound> {
        self.values.get(name)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name)? {
            Bound::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn atom(&self, name: &str) -> Option<&Symbol> {
        match self.values.get(name)? {
            Bound::Atom(s) => Some(s),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            Bound::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bound)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Canonical map view, handy for echoing bindings back in a response.
    pub fn to_value(&self) -> Value {
        Value::map(self.values.iter().map(|(k, v)| (k.clone(), v.to_value())))
    }
}
