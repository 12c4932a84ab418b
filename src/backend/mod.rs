//! Backend Module
//!
//! Axum REST API over SQLite. Only compiled with the `ssr` feature.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state, app construction
//! ├── routes/         - Router assembly
//! ├── middleware/     - Auth and validated JSON extraction
//! ├── error/          - BackendError and its HTTP mapping
//! ├── store/          - Typed SQLite access per document kind
//! ├── engine/         - Cascade create/delete and moves, transactional
//! ├── auth/           - Accounts, passwords, tokens
//! ├── boards/         - /api/boards handlers
//! ├── lists/          - /api/lists handlers
//! ├── cards/          - /api/cards handlers
//! └── checklists/     - /api/checklists handlers
//! ```
//!
//! # Request Flow
//!
//! Handler → ownership check (reject early) → engine or store → commit →
//! response. Errors of every layer convert into `BackendError`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Entity store
pub mod store;

/// Transactional mutations of the ownership tree
pub mod engine;

/// Board handlers
pub mod boards;

/// List handlers
pub mod lists;

/// Card handlers
pub mod cards;

/// Checklist handlers
pub mod checklists;

pub use error::BackendError;
pub use server::create_app;
