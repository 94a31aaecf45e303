//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//!   (camelCase columns, mapped onto snake_case fields)
//! - A create DTO for inserts

pub mod auth_provider;
pub mod user;
