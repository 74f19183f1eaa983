//! Car REST API handlers
//!
//! Thin wrappers over `CarService`; each handler decides the status of the
//! recoverable failures it can produce.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CarDto, CarRequest, ListCarsQuery, ListCarsResponse, ListMeta, RentCarRequest, RentalDto,
};
use crate::application::CarService;
use crate::config::PaginationConfig;
use crate::domain::CarFilter;
use crate::interfaces::http::common::{ApiError, ErrorResponse, IdPath, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::{parse_instant, PaginationParams};

#[derive(Clone)]
pub struct CarHandlerState {
    pub car_service: Arc<CarService>,
    pub pagination: PaginationConfig,
}

fn parse_filter(query: &ListCarsQuery) -> Result<CarFilter, ApiError> {
    let available_at = query
        .available_at
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_instant)
        .transpose()
        .map_err(ApiError::mapped(StatusCode::BAD_REQUEST))?;

    Ok(CarFilter {
        size: query.size.clone().filter(|s| !s.is_empty()),
        available_at,
    })
}

#[utoipa::path(
    get,
    path = "/v1/cars",
    tag = "Cars",
    params(ListCarsQuery),
    responses(
        (status = 200, description = "One page of cars", body = ListCarsResponse),
        (status = 400, description = "Malformed paging or filter input", body = ErrorResponse)
    )
)]
pub async fn list_cars(
    State(state): State<CarHandlerState>,
    Query(query): Query<ListCarsQuery>,
) -> Result<Json<ListCarsResponse>, ApiError> {
    let page = PaginationParams::parse(
        query.page.as_deref(),
        query.page_size.as_deref(),
        state.pagination.default_page_size,
        state.pagination.max_page_size,
    )
    .map_err(ApiError::mapped(StatusCode::BAD_REQUEST))?;
    let filter = parse_filter(&query)?;

    let result = state.car_service.list(&filter, page).await?;
    let result = result.map(CarDto::from);

    Ok(Json(ListCarsResponse {
        cars: result.items,
        meta: ListMeta {
            pagination: result.meta,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/v1/cars/{id}",
    tag = "Cars",
    params(("id" = i32, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car details", body = CarDto),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_car(
    State(state): State<CarHandlerState>,
    IdPath(id): IdPath,
) -> Result<Json<CarDto>, ApiError> {
    let car = state.car_service.get(id).await?;
    Ok(Json(car.into()))
}

#[utoipa::path(
    post,
    path = "/v1/cars",
    tag = "Cars",
    security(("bearer_auth" = [])),
    request_body = CarRequest,
    responses(
        (status = 201, description = "Created", body = CarDto),
        (status = 401, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Rejected", body = ErrorResponse)
    )
)]
pub async fn create_car(
    State(state): State<CarHandlerState>,
    ValidatedJson(req): ValidatedJson<CarRequest>,
) -> Result<(StatusCode, Json<CarDto>), ApiError> {
    let car = state
        .car_service
        .create(req.into())
        .await
        .map_err(ApiError::mapped(StatusCode::UNPROCESSABLE_ENTITY))?;
    Ok((StatusCode::CREATED, Json(car.into())))
}

#[utoipa::path(
    put,
    path = "/v1/cars/{id}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Car ID")),
    request_body = CarRequest,
    responses(
        (status = 200, description = "Updated", body = CarDto),
        (status = 401, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Unknown car or rejected update", body = ErrorResponse)
    )
)]
pub async fn update_car(
    State(state): State<CarHandlerState>,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<CarRequest>,
) -> Result<Json<CarDto>, ApiError> {
    let car = state
        .car_service
        .update(id, req.into())
        .await
        .map_err(ApiError::mapped(StatusCode::UNPROCESSABLE_ENTITY))?;
    Ok(Json(car.into()))
}

#[utoipa::path(
    delete,
    path = "/v1/cars/{id}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_car(
    State(state): State<CarHandlerState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.car_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/cars/{id}/rent",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Car ID")),
    request_body = RentCarRequest,
    responses(
        (status = 201, description = "Rental recorded", body = RentalDto),
        (status = 401, description = "Not a customer", body = ErrorResponse),
        (status = 404, description = "Unknown car", body = ErrorResponse),
        (status = 422, description = "Car already rented or invalid window", body = ErrorResponse)
    )
)]
pub async fn rent_car(
    State(state): State<CarHandlerState>,
    IdPath(id): IdPath,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<RentCarRequest>,
) -> Result<(StatusCode, Json<RentalDto>), ApiError> {
    let start = parse_instant(&req.rent_started_at)?;
    let end = req
        .rent_ended_at
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_instant)
        .transpose()?;

    let rental = state
        .car_service
        .rent(id, user.user_id, start, end)
        .await?;
    Ok((StatusCode::CREATED, Json(rental.into())))
}
