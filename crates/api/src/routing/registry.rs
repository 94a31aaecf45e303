//! Action id to handler map.
//!
//! Actions are registered once at startup under slash-separated ids such
//! as `users/exists`. Route declarations refer to actions by id only, so
//! an unknown id is reported when the route is declared rather than when
//! the first request arrives.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use axum::handler::Handler;
use axum::routing::{on, MethodFilter, MethodRouter};

use super::{RouteError, RouteMethod};

/// Builds a method router for one action, bound to the requested verb.
type ActionFactory<S> = Arc<dyn Fn(MethodFilter) -> MethodRouter<S> + Send + Sync>;

pub struct ActionRegistry<S> {
    actions: BTreeMap<String, ActionFactory<S>>,
}

impl<S> ActionRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Register `handler` under `id`.
    ///
    /// Ids are one or more non-empty segments joined by `/`. Registering the
    /// same id twice is an error.
    pub fn register<H, T>(&mut self, id: &str, handler: H) -> Result<&mut Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        validate_action_id(id)?;
        if self.actions.contains_key(id) {
            return Err(RouteError::DuplicateAction(id.to_string()));
        }

        let factory: ActionFactory<S> = Arc::new(move |filter: MethodFilter| on(filter, handler.clone()));
        self.actions.insert(id.to_string(), factory);
        Ok(self)
    }

    /// Register a group of actions sharing the `prefix/` id prefix.
    pub fn namespace(&mut self, prefix: &str) -> Namespace<'_, S> {
        Namespace {
            prefix: prefix.trim_matches('/').to_string(),
            registry: self,
        }
    }

    /// Method router for action `id`, answering only `method`.
    pub fn resolve(&self, id: &str, method: RouteMethod) -> Result<MethodRouter<S>, RouteError> {
        self.actions
            .get(id)
            .map(|factory| factory(method.filter()))
            .ok_or_else(|| RouteError::UnknownAction(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered ids in lexical order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

impl<S> Default for ActionRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for ActionRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Registration handle that prepends a fixed prefix to every id.
pub struct Namespace<'a, S> {
    registry: &'a mut ActionRegistry<S>,
    prefix: String,
}

impl<S> Namespace<'_, S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn register<H, T>(&mut self, name: &str, handler: H) -> Result<&mut Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let id = format!("{}/{}", self.prefix, name);
        self.registry.register(&id, handler)?;
        Ok(self)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<S> fmt::Debug for Namespace<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

fn validate_action_id(id: &str) -> Result<(), RouteError> {
    if id.split('/').any(|segment| segment.trim().is_empty()) {
        return Err(RouteError::InvalidActionId(id.to_string()));
    }
    Ok(())
}
