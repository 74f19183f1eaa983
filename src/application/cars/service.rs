//! Car catalogue and rental use-cases
//!
//! HTTP handlers stay thin and delegate here; rental admission outcomes are
//! counted for Prometheus.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    Car, CarFilter, CarInput, ConflictPolicy, DomainError, DomainResult, NewRental, Rental,
    RentalAdmission, RentalWindow, RepositoryProvider,
};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct CarService {
    repos: Arc<dyn RepositoryProvider>,
    conflict_policy: ConflictPolicy,
}

impl CarService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, conflict_policy: ConflictPolicy) -> Self {
        Self {
            repos,
            conflict_policy,
        }
    }

    // ── Catalogue ───────────────────────────────────────────────

    pub async fn list(
        &self,
        filter: &CarFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Car>> {
        self.repos.cars().list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Car> {
        self.repos
            .cars()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car", id))
    }

    pub async fn create(&self, input: CarInput) -> DomainResult<Car> {
        let car = self.repos.cars().create(input).await?;
        info!(car_id = car.id, name = %car.name, "Car created");
        Ok(car)
    }

    pub async fn update(&self, id: i32, input: CarInput) -> DomainResult<Car> {
        let car = self
            .repos
            .cars()
            .update(id, input)
            .await?
            .ok_or_else(|| DomainError::not_found("Car", id))?;
        info!(car_id = car.id, "Car updated");
        Ok(car)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.cars().delete(id).await?;
        info!(car_id = id, "Car deleted");
        Ok(())
    }

    // ── Rental ──────────────────────────────────────────────────

    /// Rent `car_id` for `user_id`. A missing end means a one-day rental.
    pub async fn rent(
        &self,
        car_id: i32,
        user_id: i32,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> DomainResult<Rental> {
        let window = RentalWindow::requested(start, end)?;
        let request = NewRental {
            user_id,
            car_id,
            window,
        };

        match self.repos.rentals().admit(request, self.conflict_policy).await? {
            RentalAdmission::Admitted(rental) => {
                metrics::counter!("rentals_admitted_total").increment(1);
                info!(
                    rental_id = rental.id,
                    car_id,
                    user_id,
                    start = %rental.rent_started_at,
                    end = %rental.rent_ended_at,
                    "Rental admitted"
                );
                Ok(rental)
            }
            RentalAdmission::Conflict(existing) => {
                metrics::counter!("rentals_rejected_total", "policy" => self.conflict_policy.as_str())
                    .increment(1);
                let car = self.get(car_id).await?;
                warn!(
                    car_id,
                    user_id,
                    conflicting_rental = existing.id,
                    policy = self.conflict_policy.as_str(),
                    "Rental rejected, car already rented"
                );
                Err(DomainError::CarAlreadyRented {
                    car_id: car.id,
                    car_name: car.name,
                })
            }
        }
    }
}
