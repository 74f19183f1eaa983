//! Rental repository interface

use async_trait::async_trait;

use super::model::{ConflictPolicy, NewRental, RentalAdmission};
use crate::domain::DomainResult;

#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Admission check and insert as one unit: look for an existing rental of
    /// the same car that conflicts under `policy`; if none, record the rental
    /// and flag the car as rented.
    async fn admit(&self, rental: NewRental, policy: ConflictPolicy)
        -> DomainResult<RentalAdmission>;
}
