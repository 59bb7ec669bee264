//! Route handler contract.

use crate::dispatch::params::Params;
use crate::dispatch::result::HandlerResult;
use crate::routing::Bindings;

/// A route's target. Called synchronously, once per matched request.
pub trait Handler: Send + Sync {
    fn call(&self, bindings: &Bindings, params: &Params) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Bindings, &Params) -> HandlerResult + Send + Sync,
{
    fn call(&self, bindings: &Bindings, params: &Params) -> HandlerResult {
        self(bindings, params)
    }
}
