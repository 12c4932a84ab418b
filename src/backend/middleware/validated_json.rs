/**
 * Validated JSON Extractor
 *
 * Like `axum::Json`, but also runs the body's `Validate` impl. Parse and
 * validation failures both come back as `Malformed` (422).
 */

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;
use crate::shared::validation::Validate;

#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = BackendError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection: JsonRejection| {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                BackendError::malformed(rejection.body_text())
            })?;

        value.validate().map_err(|e| {
            tracing::warn!("{}", e);
            BackendError::from(e)
        })?;

        Ok(ValidJson(value))
    }
}
