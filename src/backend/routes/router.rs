/**
 * Router Configuration
 *
 * 1. `/api` - JSON REST API (see `api_routes`)
 * 2. Static files from `STATIC_DIR`, falling back to `index.html` so the
 *    single-page client handles its own routes
 *
 * Every request runs inside a `TraceLayer` span. Error bodies gain their
 * `dev` detail only when this app's config runs in development.
 */

use axum::middleware::map_response_with_state;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::backend::middleware::attach_error_detail;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let static_dir = app_state.config.static_dir.clone();
    let static_files =
        ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", configure_api_routes(app_state.clone()))
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(map_response_with_state(app_state.clone(), attach_error_detail)),
        )
        .with_state(app_state)
}
