/**
 * Get Current User Handler
 *
 * GET /api/user/me returns the authenticated user without the password
 * hash.
 */

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::store::users;
use crate::shared::models::{EntityKind, User};

pub async fn get_me(
    State(app_state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<User>, BackendError> {
    let user = users::find(&app_state.pool, auth.id())
        .await?
        .ok_or_else(|| BackendError::not_found(EntityKind::User))?;

    Ok(Json(user))
}
