//! Domain services used by HTTP routes and the route guard.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod auth;
pub mod did;
pub mod session;
pub mod sweeper;
