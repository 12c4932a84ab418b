/**
 * Account Handlers
 *
 * - PATCH /api/user/password - replace the password hash
 * - DELETE /api/user - delete the user and everything they own
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{ChangePasswordRequest, MessageResponse};
use crate::backend::auth::password::hash_password;
use crate::backend::engine::{delete_and_unlink, Deleted};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, ValidJson};
use crate::backend::server::state::AppState;
use crate::backend::store::users;
use crate::shared::models::{now_millis, EntityKind};

pub async fn change_password(
    State(app_state): State<AppState>,
    auth: AuthUser,
    ValidJson(request): ValidJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let password_hash = hash_password(request.password, app_state.config.bcrypt_cost).await?;

    if !users::update_password(&app_state.pool, auth.id(), &password_hash, now_millis()).await? {
        return Err(BackendError::not_found(EntityKind::User));
    }

    tracing::info!("Password changed for user {}", auth.id());
    Ok(Json(MessageResponse::new("password updated")))
}

pub async fn delete_user(
    State(app_state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Deleted>, BackendError> {
    let deleted = delete_and_unlink(&app_state.pool, auth.id(), EntityKind::User, auth.id()).await?;
    Ok(Json(deleted))
}
