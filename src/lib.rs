//! Bookshelf application library
//!
//! Author and book modules, the named search registry, and the bootstrap
//! that wires them into the HTTP server.

pub mod app;
pub mod modules;
pub mod search;

pub use app::{build_registry, run};
