//! Car DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Car, CarInput, Rental};
use crate::shared::PaginationMeta;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub size: String,
    pub image: String,
    pub is_currently_rented: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Car> for CarDto {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            name: c.name,
            price: c.price,
            size: c.size,
            image: c.image,
            is_currently_rented: c.is_currently_rented,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Query string of `GET /v1/cars`. Values are kept raw so malformed paging
/// input can be reported as a validation error instead of a query rejection.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCarsQuery {
    /// 1-based page number
    pub page: Option<String>,
    /// Records per page
    pub page_size: Option<String>,
    /// Exact size category
    pub size: Option<String>,
    /// Only cars with no rental ending at or after this instant (RFC 3339 or YYYY-MM-DD)
    pub available_at: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListMeta {
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListCarsResponse {
    pub cars: Vec<CarDto>,
    pub meta: ListMeta,
}

/// Body of create and update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CarRequest {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    #[validate(length(min = 1, max = 50, message = "size is required"))]
    pub size: String,
    #[serde(default)]
    pub image: String,
}

impl From<CarRequest> for CarInput {
    fn from(r: CarRequest) -> Self {
        Self {
            name: r.name,
            price: r.price,
            size: r.size,
            image: r.image,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentCarRequest {
    /// RFC 3339 instant or YYYY-MM-DD
    #[validate(length(min = 1, message = "rentStartedAt is required"))]
    pub rent_started_at: String,
    /// Defaults to one day after the start
    pub rent_ended_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalDto {
    pub id: i32,
    pub user_id: i32,
    pub car_id: i32,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rental> for RentalDto {
    fn from(r: Rental) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            car_id: r.car_id,
            rent_started_at: r.rent_started_at,
            rent_ended_at: r.rent_ended_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
