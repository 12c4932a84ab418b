//! Kanban - Board Backend Library
//!
//! A Trello-style board backend: users own boards, boards own ordered lists,
//! lists own ordered cards and cards own ordered checklists.
//!
//! # Module Structure
//!
//! - **`shared`** - Document models, the ownership check, order
//!   reconciliation and validation. No I/O.
//! - **`backend`** - Axum REST API over SQLite (only compiled with the `ssr`
//!   feature): entity store, cascade and reorder engines, auth, handlers.
//!
//! # Usage
//!
//! ```rust,no_run
//! use kanban::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for validation and serialization
//! - `backend::error::BackendError` for everything a handler can return

/// Shared types and pure logic
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
