//! Passkeep API server library.
//!
//! Exposes the building blocks (config, state, error handling, the route
//! scope DSL and the declared routes) so integration tests and the binary
//! entrypoint can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod routing;
pub mod state;
