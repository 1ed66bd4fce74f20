//! Envelope API server library.
//!
//! Exposes configuration, state, error handling, envelope emission and the
//! route tree so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
