/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, and `From` impls so `?` works across the
 * store, engine, auth and shared layers.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "message": "board not found",
 *   "status": 404,
 *   "fields": [{ "field": "name", "message": "..." }],
 *   "dev": "only from an app running in development"
 * }
 * ```
 *
 * The response never carries `dev` by itself. It stores an [`ErrorDetail`]
 * extension instead, and `middleware::error_detail` turns that into the `dev`
 * field when the app's own config allows it.
 */

use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::backend::auth::sessions::TokenError;
use crate::backend::error::types::BackendError;
use crate::backend::store::StoreError;
use crate::shared::error::{FieldError, SharedError};
use crate::shared::order::OrderError;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ErrorBody {
    message: String,
    status: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dev: Option<String>,
}

/// Public error body plus the detail only shown in development
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    body: ErrorBody,
    dev: Option<String>,
}

impl ErrorDetail {
    /// The body with `dev` filled in, `None` when there is no detail to add
    pub(crate) fn into_debug_body(self) -> Option<ErrorBody> {
        let dev = self.dev?;
        Some(ErrorBody {
            dev: Some(dev),
            ..self.body
        })
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let BackendError::Internal { detail } = &self {
            tracing::error!("Internal error: {}", detail);
        }

        let dev = self.dev_detail();
        let body = ErrorBody {
            message: self.message(),
            status: status.as_u16(),
            dev: None,
            fields: match self {
                BackendError::Malformed { fields, .. } => fields,
                _ => Vec::new(),
            },
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(ErrorDetail { body, dev });
        response
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { fields } => BackendError::Malformed {
                message: "Invalid request body".to_string(),
                fields,
            },
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, .. } => BackendError::not_found(kind),
            StoreError::ConstraintViolation { message } => BackendError::unprocessable(message),
            other => BackendError::internal(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::from(err).into()
    }
}

impl From<OrderError> for BackendError {
    fn from(err: OrderError) -> Self {
        BackendError::unprocessable(err.to_string())
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => BackendError::unauthenticated("Token expired"),
            TokenError::Invalid(_) => BackendError::unauthenticated("Invalid token"),
            TokenError::Issue(detail) => BackendError::internal(detail),
        }
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        BackendError::internal(format!("Password hashing failed: {}", err))
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(err: tokio::task::JoinError) -> Self {
        BackendError::internal(format!("Blocking task failed: {}", err))
    }
}
