use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with {field}={value} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0} is not registered!")]
    EmailNotRegistered(String),

    #[error("Password is not correct!")]
    WrongPassword,

    #[error("{0} is already taken!!")]
    EmailAlreadyTaken(String),

    #[error("{car_name} is already rented!!")]
    CarAlreadyRented { car_id: i32, car_name: String },

    #[error("Access forbidden!")]
    InsufficientAccess { role: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    /// Wire name of the error, as rendered in `{"error": {"name": ...}}`.
    pub fn name(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "NotFoundError",
            DomainError::EmailNotRegistered(_) => "EmailNotRegisteredError",
            DomainError::WrongPassword => "WrongPasswordError",
            DomainError::EmailAlreadyTaken(_) => "EmailAlreadyTakenError",
            DomainError::CarAlreadyRented { .. } => "CarAlreadyRentedError",
            DomainError::InsufficientAccess { .. } => "InsufficientAccessError",
            DomainError::Unauthorized(_) => "UnauthorizedError",
            DomainError::Validation(_) => "ValidationError",
            DomainError::Database(_) => "DatabaseError",
            DomainError::Internal(_) => "InternalServerError",
        }
    }

    /// Machine-readable details, if the error carries any.
    pub fn details(&self) -> Option<Value> {
        match self {
            DomainError::NotFound {
                entity,
                field,
                value,
            } => Some(json!({ "entity": entity, "field": field, "value": value })),
            DomainError::EmailNotRegistered(email) | DomainError::EmailAlreadyTaken(email) => {
                Some(json!({ "email": email }))
            }
            DomainError::CarAlreadyRented { car_id, car_name } => Some(json!({
                "car": { "id": car_id, "name": car_name }
            })),
            DomainError::InsufficientAccess { role } => Some(json!({
                "role": role,
                "reason": format!("{} is not allowed to perform this operation.", role),
            })),
            _ => None,
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether a handler may turn this error into a 4xx response instead of
    /// forwarding it to the 500 fallback.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DomainError::Database(_) | DomainError::Internal(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg))
            | Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                DomainError::Validation(msg)
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}
