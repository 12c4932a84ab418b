//! Shared Module
//!
//! Types and pure logic that don't depend on the HTTP server or the database:
//! the document models, the ownership check, the order reconciliation
//! algorithm and request validation.

/// Document models of the ownership tree
pub mod models;

/// Ownership-chain authorization
pub mod access;

/// Order reconciliation for moves
pub mod order;

/// Request field validation
pub mod validation;

/// Shared error types
pub mod error;

pub use access::{authorize, Owned};
pub use error::{FieldError, SharedError};
pub use models::{Entity, EntityKind};
pub use order::{reconcile_move, OrderError, Placement, ReconciledOrder};
