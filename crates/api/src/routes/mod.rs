//! Route declarations.
//!
//! [`actions`] registers every handler under its action id; [`declare`]
//! lays the HTTP surface out with the scope DSL:
//!
//! ```text
//! GET  /                    system/index
//! GET  /health              system/health
//! GET  /users/exists        users/exists_by_query   [no_store, require_json]
//! GET  /users/exists/{id}   users/exists            [no_store, require_json]
//! POST /users               users/create            [no_store, require_json]
//! ```

pub mod users;

use crate::handlers::{system, users as user_handlers};
use crate::middleware::{no_store, require_json};
use crate::routing::{ActionRegistry, RouteBuilder, RouteError};
use crate::state::AppState;

/// Every action the API can bind, keyed by `namespace/name`.
pub fn actions() -> Result<ActionRegistry<AppState>, RouteError> {
    let mut registry = ActionRegistry::new();

    registry
        .namespace("system")
        .register("index", system::index)?
        .register("health", system::health)?;

    registry
        .namespace("users")
        .register("exists", user_handlers::exists)?
        .register("exists_by_query", user_handlers::exists_by_query)?
        .register("create", user_handlers::create)?;

    Ok(registry)
}

/// Top-level route declarations.
pub fn declare(routes: &mut RouteBuilder<'_, AppState>) -> Result<(), RouteError> {
    routes.root("system/index")?.get("/health", "system/health")?;

    routes.scope_with("users", [no_store(), require_json()], users::declare)?;

    Ok(())
}
