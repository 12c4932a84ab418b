//! Middleware Module
//!
//! - **`auth`** - bearer-token authentication and the `AuthUser` extractor
//! - **`validated_json`** - JSON body extractor that runs field validation
//! - **`error_detail`** - adds debug detail to error bodies in development

pub mod auth;
pub mod error_detail;
pub mod validated_json;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use error_detail::attach_error_detail;
pub use validated_json::ValidJson;
