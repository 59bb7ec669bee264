//! Admission filters applied after a route matches.
//!
//! A rejected request is answered exactly like an unmatched one, so clients
//! cannot probe for routes they are not allowed to see.

use std::collections::HashSet;

use crate::config::FilterConfig;
use crate::routing::RouteDescriptor;

/// Per-request admission predicate over the matched route.
pub trait RouteFilter: Send + Sync {
    fn allows(&self, route: &RouteDescriptor) -> bool;
}

impl<F> RouteFilter for F
where
    F: Fn(&RouteDescriptor) -> bool + Send + Sync,
{
    fn allows(&self, route: &RouteDescriptor) -> bool {
        self(route)
    }
}

/// Admits routes carrying at least one of the allowed tags.
#[derive(Debug, Clone)]
pub struct TagFilter {
    allowed: HashSet<String>,
}

impl TagFilter {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter described by configuration, if enabled.
    pub fn from_config(config: &FilterConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.allowed_tags.iter().cloned()))
    }
}

impl RouteFilter for TagFilter {
    fn allows(&self, route: &RouteDescriptor) -> bool {
        route.tags.iter().any(|t| self.allowed.contains(t))
    }
}
