//! Checklists Module
//!
//! HTTP handlers for `/api/checklists`.

pub mod handlers;
pub mod types;

pub use handlers::*;
