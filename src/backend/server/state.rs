/**
 * Application State
 *
 * Everything handlers share: the SQLite pool, the immutable configuration
 * and the token keys. All of it is cheap to clone.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenKeys;
use crate::backend::server::config::ServerConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<ServerConfig>,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: ServerConfig) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl);
        Self {
            pool,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<TokenKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}
