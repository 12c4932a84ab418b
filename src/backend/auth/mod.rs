//! Authentication Module
//!
//! Accounts, password hashing and session tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt hashing on the blocking pool
//! ├── sessions.rs     - JWT issue and verify
//! └── handlers/       - HTTP handlers for /api/user
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username and password → user created → token returned
//! 2. **Login**: username and password verified → token returned
//! 3. **Protected routes**: `Authorization: Bearer <token>` checked by
//!    `middleware::auth_middleware`
//!
//! Tokens expire after the configured lifetime (6 hours by default).

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use sessions::{IssuedToken, TokenError, TokenKeys};
