//! Request extractors whose rejections go through `AppError`, so a malformed
//! request gets the same JSON envelope as any other failure.

use axum::async_trait;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Form;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::forms::collect_fields;
use crate::utils::error::AppError;

/// A form-encoded submission. Repeated and aliased keys are folded by
/// [`collect_fields`] before `T` is deserialised.
#[derive(Debug)]
pub struct FormData<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormData<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
        let fields = collect_fields(pairs);

        serde_json::from_value(Value::Object(fields))
            .map(FormData)
            .map_err(|e| AppError::Validation(format!("Invalid form submission: {e}")))
    }
}

/// An integer record id from the path. Anything else names no page.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(PathRejection::FailedToDeserializePathParams(_)) => Err(AppError::NotFound(
                format!("No page at '{}'", parts.uri.path()),
            )),
            Err(rejection) => Err(AppError::Internal(rejection.body_text())),
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
