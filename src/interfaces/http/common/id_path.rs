//! Integer `{id}` path extractor
//!
//! `IdPath` reads the `{id}` segment like `Path<i32>`, but a value that is
//! not an integer names no record, so it is answered with the JSON
//! `NotFoundError` envelope instead of axum's plain-text rejection.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde_json::json;

use super::ApiError;

pub struct IdPath(pub i32);

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "ValidationError",
            rejection.body_text(),
        )
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        raw.trim().parse::<i32>().map(IdPath).map_err(|_| {
            ApiError::new(StatusCode::NOT_FOUND, "NotFoundError", "Not found!")
                .with_details(json!({ "id": raw }))
        })
    }
}
