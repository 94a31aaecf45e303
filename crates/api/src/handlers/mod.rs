//! Action handlers, one module per action namespace.

pub mod system;
pub mod users;
