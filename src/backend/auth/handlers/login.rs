/**
 * Login Handler
 *
 * POST /api/user/login
 *
 * Unknown usernames and wrong passwords get the same 401.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::password::verify_password;
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidJson;
use crate::backend::server::state::AppState;
use crate::backend::store::users;
use crate::shared::models::now_millis;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub async fn login(
    State(app_state): State<AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.username);

    let user = users::find_by_username(&app_state.pool, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.username);
            BackendError::unauthenticated(INVALID_CREDENTIALS)
        })?;

    if !verify_password(request.password, user.password.clone()).await? {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthenticated(INVALID_CREDENTIALS));
    }

    users::update_last_login(&app_state.pool, user.id, now_millis()).await?;
    let issued = app_state.tokens.issue(user.id)?;

    tracing::info!("User logged in successfully: {}", user.username);

    Ok(Json(AuthResponse::new(user.id, issued)))
}
