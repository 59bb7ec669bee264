//! Closed symbol universe for `atom` bindings.
//!
//! Path segments bound as `atom` must name a symbol registered at startup.
//! Unknown names fail the match for that route; nothing is interned at
//! request time.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// An interned name from the [`SymbolTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Known symbols. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashSet<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol, returning the interned handle.
    pub fn insert(&mut self, name: &str) -> Symbol {
        if let Some(existing) = self.symbols.get(name) {
            return existing.clone();
        }
        let symbol = Symbol(Arc::from(name));
        self.symbols.insert(symbol.clone());
        symbol
    }

    /// Look up an existing symbol.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        table.extend(iter);
        table
    }
}

impl<S: AsRef<str>> Extend<S> for SymbolTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}
