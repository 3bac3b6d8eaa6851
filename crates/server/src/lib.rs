//! Stonebridge Construction backend library.
//!
//! The marketing site API and the admin console backend in one binary.
//! Exposed as a library so integration tests can build the router over the
//! in-memory store without a running Postgres.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

pub use routes::router;
pub use state::AppState;
