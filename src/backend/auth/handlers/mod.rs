//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - POST /api/user/signup
//! ├── login.rs    - POST /api/user/login
//! ├── me.rs       - GET /api/user/me
//! └── account.rs  - PATCH /api/user/password, DELETE /api/user
//! ```

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Password change and account deletion
pub mod account;

pub use types::{AuthResponse, ChangePasswordRequest, Credentials, MessageResponse};

pub use account::{change_password, delete_user};
pub use login::login;
pub use me::get_me;
pub use signup::signup;
