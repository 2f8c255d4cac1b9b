//! JSON body extractor that reports rejections as `AppError`.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON extractor whose rejections render through [`AppError`].
///
/// Malformed or mistyped bodies become a 400 and a missing JSON content type
/// a 415, both with the regular error envelope instead of axum's plain-text
/// reply.
///
/// ```rust,ignore
/// async fn create_user(JsonBody(payload): JsonBody<Option<UserPayload>>) {
///     // `null` arrives as `None`
/// }
/// ```
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| match e {
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::UnsupportedMediaType(e.body_text())
                }
                _ => AppError::bad_request(e.body_text()),
            })?;

        Ok(JsonBody(value))
    }
}
