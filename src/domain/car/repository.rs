//! Car repository interface

use async_trait::async_trait;

use super::model::{Car, CarFilter, CarInput};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// One page of cars matching `filter`, plus the total count under the same filter.
    async fn list(
        &self,
        filter: &CarFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Car>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Car>>;
    /// Insert a new car; it always starts out not rented.
    async fn create(&self, input: CarInput) -> DomainResult<Car>;
    /// Overwrite the writable fields and clear the rented flag.
    /// `Ok(None)` when no car has this id.
    async fn update(&self, id: i32, input: CarInput) -> DomainResult<Option<Car>>;
    /// `NotFound` when no car has this id.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
