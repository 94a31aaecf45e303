//! Domain types, errors and request validation shared by the passkeep
//! crates. Nothing in here touches the network or the database.

pub mod error;
pub mod services;
pub mod types;
pub mod users;
pub mod validation;
