//! Lists Module
//!
//! HTTP handlers for `/api/lists`.

pub mod handlers;
pub mod types;

pub use handlers::*;
