//! Route-scope registration DSL.
//!
//! Routes are declared in a flat style against a [`RouteBuilder`]:
//!
//! ```ignore
//! let mut routes = RouteBuilder::new(&registry);
//! routes.root("system/index")?;
//! routes.scope_with("users", [middleware::no_store()], |users| {
//!     users.get("/exists/{id}", "users/exists")?;
//!     Ok(())
//! })?;
//! let (router, table) = routes.finish();
//! ```
//!
//! - [`registry`] -- action id to handler map, filled once at startup.
//! - [`middleware`] -- named, cloneable wrapper around a tower layer.
//! - [`builder`] -- the scope builder; nesting, middleware inheritance.
//! - [`table`] -- the flat list of declared routes plus conflict checks.

pub mod builder;
pub mod error;
pub mod middleware;
pub mod registry;
pub mod table;

use std::fmt;

use axum::routing::MethodFilter;

pub use builder::RouteBuilder;
pub use error::RouteError;
pub use middleware::Middleware;
pub use registry::ActionRegistry;
pub use table::{RouteDefinition, RouteTable};

/// HTTP verbs a route can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RouteMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Patch => "PATCH",
            RouteMethod::Delete => "DELETE",
        }
    }

    pub(crate) fn filter(self) -> MethodFilter {
        match self {
            RouteMethod::Get => MethodFilter::GET,
            RouteMethod::Post => MethodFilter::POST,
            RouteMethod::Put => MethodFilter::PUT,
            RouteMethod::Patch => MethodFilter::PATCH,
            RouteMethod::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
