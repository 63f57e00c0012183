//! Request body extraction with boundary validation

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::models::error::ApiError;

/// JSON body that has been deserialized and validated.
///
/// Malformed JSON, a wrong content type or a missing field is a
/// `BAD_REQUEST`, an oversized body is `PAYLOAD_TOO_LARGE`, and a field
/// outside its bounds is a `VALIDATION_ERROR`. In every case the handler
/// never runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(rejection.body_text()),
                _ => ApiError::BadRequest(rejection.body_text()),
            })?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
