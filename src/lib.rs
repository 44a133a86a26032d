//! Vouch - a terminal client for a testimonial-collection service.
//!
//! This library provides the client state (session, token, query cache),
//! the HTTP adapter for the remote service, and the terminal view layer
//! used by the `vouch` binary. The service itself — accounts, storage,
//! moderation — lives behind the HTTP boundary and is not modelled here.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod notify;
pub mod render;
pub mod session;
pub mod store;
pub mod token_store;
pub mod types;

// Re-export Args for the binary
pub use cli::Args;
