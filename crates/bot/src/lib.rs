//! `passkeep-bot` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod handler;
pub mod poller;
pub mod telegram;
