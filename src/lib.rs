//! didlist: a DID (to-do) list service with session-gated pages and
//! per-user preference storage.
//!
//! The binary in `main.rs` wires these modules into an Axum server.

pub mod config;
pub mod db;
pub mod guard;
pub mod routes;
pub mod services;
pub mod settings;
pub mod state;
