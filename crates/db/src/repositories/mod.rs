//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&SqlitePool` as the first argument.

pub mod auth_provider_repo;
pub mod user_repo;

pub use auth_provider_repo::AuthProviderRepo;
pub use user_repo::UserRepo;
