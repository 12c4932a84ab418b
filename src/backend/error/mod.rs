//! Backend Error Module
//!
//! Error taxonomy returned by handlers and its HTTP mapping.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse and From implementations
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::ErrorDetail;
pub use types::{BackendError, INTERNAL_MESSAGE};
