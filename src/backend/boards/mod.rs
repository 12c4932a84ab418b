//! Boards Module
//!
//! HTTP handlers for `/api/boards`.

pub mod handlers;
pub mod types;

pub use handlers::*;
