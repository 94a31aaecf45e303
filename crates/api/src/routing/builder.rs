//! Scope-aware route builder.
//!
//! A [`RouteBuilder`] owns the routes declared so far plus the frame of the
//! scope it represents. `scope` creates a child builder with a derived frame,
//! hands it to the caller's closure and folds the child's routes back under
//! the scope's segment once the closure returns. The parent frame is never
//! mutated, so siblings and routes declared after a scope closes only see
//! their own path and middleware chain.

use std::fmt;
use std::mem;

use axum::routing::MethodRouter;
use axum::Router;

use super::{ActionRegistry, Middleware, RouteDefinition, RouteError, RouteMethod, RouteTable};

/// Path and middleware chain of the innermost open scope.
struct ScopeFrame<S> {
    /// Slash-joined segments of every open scope, `None` at the top level.
    path: Option<String>,
    /// Inherited middlewares, outermost first.
    middlewares: Vec<Middleware<S>>,
}

impl<S> ScopeFrame<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn root() -> Self {
        Self {
            path: None,
            middlewares: Vec::new(),
        }
    }

    fn enter<I>(&self, segment: &str, middlewares: I) -> Self
    where
        I: IntoIterator<Item = Middleware<S>>,
    {
        let path = match &self.path {
            Some(parent) => format!("{parent}/{segment}"),
            None => segment.to_string(),
        };

        let mut chain = self.middlewares.clone();
        chain.extend(middlewares);

        Self {
            path: Some(path),
            middlewares: chain,
        }
    }
}

pub struct RouteBuilder<'r, S> {
    registry: &'r ActionRegistry<S>,
    frame: ScopeFrame<S>,
    /// Method routers keyed by path relative to this builder.
    bindings: Vec<(String, MethodRouter<S>)>,
    table: RouteTable,
}

impl<S> fmt::Debug for RouteBuilder<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBuilder")
            .field("scope", &self.frame.path)
            .field(
                "middlewares",
                &self.frame.middlewares.iter().map(Middleware::name).collect::<Vec<_>>(),
            )
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl<'r, S> RouteBuilder<'r, S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(registry: &'r ActionRegistry<S>) -> Self {
        Self {
            registry,
            frame: ScopeFrame::root(),
            bindings: Vec::new(),
            table: RouteTable::default(),
        }
    }

    /// Drop every route declared on this builder so far.
    pub fn reset(&mut self) -> &mut Self {
        self.bindings.clear();
        self.table = RouteTable::default();
        self
    }

    /// Full path of the current scope (`"users"`, `"a/b"`), `None` at the top level.
    pub fn scope_path(&self) -> Option<&str> {
        self.frame.path.as_deref()
    }

    /// Middlewares every route declared here will run through, outermost first.
    pub fn middlewares(&self) -> &[Middleware<S>] {
        &self.frame.middlewares
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    // -----------------------------------------------------------------------
    // Scopes
    // -----------------------------------------------------------------------

    pub fn scope<F>(&mut self, segment: &str, register: F) -> Result<&mut Self, RouteError>
    where
        F: FnOnce(&mut RouteBuilder<'r, S>) -> Result<(), RouteError>,
    {
        self.scope_with(segment, Vec::new(), register)
    }

    /// Open a scope under `segment` whose routes also run through `middlewares`.
    ///
    /// The closure declares routes on a child builder. Errors it returns are
    /// passed through untouched.
    pub fn scope_with<I, F>(
        &mut self,
        segment: &str,
        middlewares: I,
        register: F,
    ) -> Result<&mut Self, RouteError>
    where
        I: IntoIterator<Item = Middleware<S>>,
        F: FnOnce(&mut RouteBuilder<'r, S>) -> Result<(), RouteError>,
    {
        let segment = normalize_segment(segment)?;

        let mut child = RouteBuilder {
            registry: self.registry,
            frame: self.frame.enter(segment, middlewares),
            bindings: Vec::new(),
            table: RouteTable::default(),
        };
        register(&mut child)?;

        let RouteBuilder {
            frame,
            bindings,
            table,
            ..
        } = child;

        if bindings.is_empty() {
            tracing::warn!(
                scope = frame.path.as_deref().unwrap_or(segment),
                "Scope declares no routes, skipping"
            );
            return Ok(self);
        }

        self.table.absorb(table)?;
        let prefix = format!("/{segment}");
        for (path, method_router) in bindings {
            self.bind(join_path(Some(&prefix), &path), method_router);
        }
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Routes
    // -----------------------------------------------------------------------

    /// Bind action `action_id` to `method path` inside the current scope.
    pub fn route(
        &mut self,
        method: RouteMethod,
        path: &str,
        action_id: &str,
    ) -> Result<&mut Self, RouteError> {
        validate_path(path)?;
        let handler = self.registry.resolve(action_id, method)?;

        let full_path = match self.scope_path() {
            Some(scope) => join_path(Some(&format!("/{scope}")), path),
            None => path.to_string(),
        };

        self.table.insert(RouteDefinition {
            method,
            path: path.to_string(),
            full_path,
            action_id: action_id.to_string(),
            middlewares: self.frame.middlewares.iter().map(Middleware::name).collect(),
        })?;

        // The last layer applied ends up outermost.
        let method_router = self
            .frame
            .middlewares
            .iter()
            .rev()
            .fold(handler, |router, middleware| middleware.apply(router));

        self.bind(path.to_string(), method_router);
        Ok(self)
    }

    pub fn get(&mut self, path: &str, action_id: &str) -> Result<&mut Self, RouteError> {
        self.route(RouteMethod::Get, path, action_id)
    }

    pub fn post(&mut self, path: &str, action_id: &str) -> Result<&mut Self, RouteError> {
        self.route(RouteMethod::Post, path, action_id)
    }

    pub fn put(&mut self, path: &str, action_id: &str) -> Result<&mut Self, RouteError> {
        self.route(RouteMethod::Put, path, action_id)
    }

    pub fn patch(&mut self, path: &str, action_id: &str) -> Result<&mut Self, RouteError> {
        self.route(RouteMethod::Patch, path, action_id)
    }

    pub fn delete(&mut self, path: &str, action_id: &str) -> Result<&mut Self, RouteError> {
        self.route(RouteMethod::Delete, path, action_id)
    }

    /// `GET /` of the current scope.
    pub fn root(&mut self, action_id: &str) -> Result<&mut Self, RouteError> {
        self.get("/", action_id)
    }

    /// Assemble the axum router and hand back the route table alongside it.
    pub fn finish(self) -> (Router<S>, RouteTable) {
        let router = self
            .bindings
            .into_iter()
            .fold(Router::new(), |router, (path, method_router)| {
                router.route(&path, method_router)
            });
        (router, self.table)
    }

    /// Merge into an existing binding for the same path. The route table
    /// has already rejected overlapping methods, so the merge cannot panic.
    fn bind(&mut self, path: String, method_router: MethodRouter<S>) {
        match self.bindings.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => {
                let current = mem::replace(existing, MethodRouter::new());
                *existing = current.merge(method_router);
            }
            None => self.bindings.push((path, method_router)),
        }
    }
}

fn normalize_segment(segment: &str) -> Result<&str, RouteError> {
    let trimmed = segment.trim_matches('/');
    if trimmed.is_empty() || trimmed.contains('/') || trimmed.contains(char::is_whitespace) {
        return Err(RouteError::InvalidScope(segment.to_string()));
    }
    Ok(trimmed)
}

fn validate_path(path: &str) -> Result<(), RouteError> {
    if !path.starts_with('/') || path.contains("//") || path.contains(char::is_whitespace) {
        return Err(RouteError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// `"/"` inside a prefix collapses to the prefix itself.
fn join_path(prefix: Option<&str>, path: &str) -> String {
    match prefix {
        Some(prefix) if path == "/" => prefix.to_string(),
        Some(prefix) => format!("{prefix}{path}"),
        None => path.to_string(),
    }
}
