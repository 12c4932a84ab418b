/**
 * Signup Handler
 *
 * POST /api/user/signup
 *
 * 1. Validate username (4-16) and password (8-32)
 * 2. Open a transaction and reject a taken username
 * 3. Hash the password with bcrypt
 * 4. Insert the user, issue a token and commit
 *
 * The unique index on `username` still rejects the loser when two signups
 * race for the same name.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::password::hash_password;
use crate::backend::error::BackendError;
use crate::backend::middleware::ValidJson;
use crate::backend::server::state::AppState;
use crate::backend::store::users;
use crate::shared::models::{now_millis, User};

pub async fn signup(
    State(app_state): State<AppState>,
    ValidJson(request): ValidJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("Signup request for username: {}", request.username);

    let mut tx = app_state.pool.begin().await?;

    if users::find_by_username(&mut *tx, &request.username)
        .await?
        .is_some()
    {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(BackendError::unprocessable("Username already taken"));
    }

    let password_hash = hash_password(request.password, app_state.config.bcrypt_cost).await?;
    let user = User::new(request.username, password_hash, now_millis());

    users::insert(&mut *tx, &user).await?;
    let issued = app_state.tokens.issue(user.id)?;
    tx.commit().await?;

    tracing::info!("User created: {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(AuthResponse::new(user.id, issued))))
}
