/**
 * Authentication Middleware
 *
 * Protects every route below `/api` except signup and login. The token comes
 * from `Authorization: Bearer <token>`; the user it names must still exist.
 *
 * | Condition                       | Status |
 * |---------------------------------|--------|
 * | header missing                  | 401    |
 * | header not `Bearer <token>`     | 422    |
 * | bad signature / expired token   | 401    |
 * | user no longer exists           | 401    |
 *
 * `OPTIONS` requests pass through untouched.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, Method},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::users;

/// Authenticated user data extracted from the token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Split `Bearer <token>` into the token
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthenticated("Authentication required")
        })?
        .to_str()
        .map_err(|_| BackendError::malformed("Invalid Authorization header"))?;

    let token = bearer_token(header).ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::malformed("Authorization header must be 'Bearer <token>'")
    })?;

    let user_id = app_state.tokens.verify(token).map_err(|e| {
        tracing::warn!("Rejected token: {}", e);
        BackendError::from(e)
    })?;

    if users::find(&app_state.pool, user_id).await?.is_none() {
        tracing::warn!("Token for deleted user {}", user_id);
        return Err(BackendError::unauthenticated("User no longer exists"));
    }

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind [`auth_middleware`].
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthenticated("Authentication required")
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer  abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[tokio::test]
    async fn test_extractor_requires_extension() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/api/boards")
            .body(())
            .unwrap()
            .into_parts();

        let missing = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(missing, Err(BackendError::Unauthenticated { .. })));

        let user_id = Uuid::new_v4();
        parts.extensions.insert(AuthenticatedUser { user_id });
        let found = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(found.id(), user_id);
    }
}
