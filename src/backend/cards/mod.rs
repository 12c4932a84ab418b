//! Cards Module
//!
//! HTTP handlers for `/api/cards`.

pub mod handlers;
pub mod types;

pub use handlers::*;
