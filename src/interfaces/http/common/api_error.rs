//! JSON error envelope
//!
//! Every failure leaves the API as
//! `{"error": {"name": ..., "message": ..., "details": ...}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Error payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

/// Top-level error response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// An error on its way out of a handler
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub name: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            name: name.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Render a domain error with an explicit status. Unrecoverable errors
    /// still go out as 500.
    pub fn from_domain(status: StatusCode, err: DomainError) -> Self {
        let status = if err.is_recoverable() {
            status
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            name: err.name().to_string(),
            message: err.to_string(),
            details: err.details(),
        }
    }

    /// Adapter for `map_err` when a handler fixes the status of every
    /// recoverable failure, e.g. `map_err(ApiError::mapped(StatusCode::UNPROCESSABLE_ENTITY))`.
    pub fn mapped(status: StatusCode) -> impl Fn(DomainError) -> Self {
        move |err| Self::from_domain(status, err)
    }

    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                name: self.name.clone(),
                message: self.message.clone(),
                details: self.details.clone(),
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::NotFound { .. } | DomainError::EmailNotRegistered(_) => {
                StatusCode::NOT_FOUND
            }
            DomainError::WrongPassword
            | DomainError::Unauthorized(_)
            | DomainError::InsufficientAccess { .. } => StatusCode::UNAUTHORIZED,
            DomainError::EmailAlreadyTaken(_)
            | DomainError::CarAlreadyRented { .. }
            | DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Database(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::from_domain(status, err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(name = %self.name, message = %self.message, "Request failed");
        }
        (self.status, Json(self.body())).into_response()
    }
}
