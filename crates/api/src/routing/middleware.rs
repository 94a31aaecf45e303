use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::IntoResponse;
use axum::routing::{MethodRouter, Route};
use tower::{Layer, Service};

type ApplyFn<S> = Arc<dyn Fn(MethodRouter<S>) -> MethodRouter<S> + Send + Sync>;

/// A named layer that a scope applies to every route declared inside it.
///
/// The name is what shows up in the route table and logs; the layer itself
/// is type-erased so scopes can mix middlewares of different types.
pub struct Middleware<S> {
    name: &'static str,
    apply: ApplyFn<S>,
}

impl<S> Middleware<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Wrap any tower layer that axum accepts on a method router.
    pub fn layer<L>(name: &'static str, layer: L) -> Self
    where
        L: Layer<Route> + Clone + Send + Sync + 'static,
        L::Service: Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        Self {
            name,
            apply: Arc::new(move |router: MethodRouter<S>| router.layer(layer.clone())),
        }
    }

    pub(crate) fn apply(&self, router: MethodRouter<S>) -> MethodRouter<S> {
        (self.apply)(router)
    }
}

impl<S> Clone for Middleware<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<S> Middleware<S> {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<S> fmt::Debug for Middleware<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Middleware").field(&self.name).finish()
    }
}
