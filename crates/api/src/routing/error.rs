use super::RouteMethod;

/// Startup-time failure while assembling the route table.
///
/// None of these are recoverable: the server must not start with a
/// route table that does not match its declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("Action '{0}' is already registered")]
    DuplicateAction(String),

    #[error("Invalid action id '{0}': expected non-empty segments separated by '/'")]
    InvalidActionId(String),

    #[error("Invalid scope segment '{0}'")]
    InvalidScope(String),

    #[error("Invalid route path '{0}': must start with '/' and contain no empty segments")]
    InvalidPath(String),

    #[error("Route {method} {path} is declared twice")]
    DuplicateRoute { method: RouteMethod, path: String },

    #[error("Route {path} conflicts with {existing} (same shape, different parameter names)")]
    ConflictingRoute { path: String, existing: String },
}
