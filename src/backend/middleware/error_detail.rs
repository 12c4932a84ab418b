/**
 * Error Detail Middleware
 *
 * Error responses carry their internal detail as an `ErrorDetail` extension.
 * This layer strips it from every response and, only for an app whose
 * config runs in development, rewrites the JSON body with the `dev` field.
 */

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::ErrorDetail;
use crate::backend::server::state::AppState;

pub async fn attach_error_detail(State(app_state): State<AppState>, mut response: Response) -> Response {
    let Some(detail) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };
    if !app_state.config.debug_detail() {
        return response;
    }

    match detail.into_debug_body() {
        Some(body) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}
