/**
 * Server Initialization
 *
 * 1. Open the SQLite pool and run migrations
 * 2. Build the application state
 * 3. Create the router
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{self, StoreError};

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing kanban backend server");

    let pool = store::connect(&config.database_url).await?;
    Ok(build_app(pool, config))
}

/// Build the router around an already-migrated pool
pub fn build_app(pool: SqlitePool, config: ServerConfig) -> Router<()> {
    if config.debug_detail() {
        tracing::warn!("Debug error detail enabled");
    }

    let app_state = AppState::new(pool, config);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    app
}
