//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{CarRepository, RentalRepository, RepositoryProvider, TaskRepository, UserRepository};

use super::car_repository::SeaOrmCarRepository;
use super::rental_repository::SeaOrmRentalRepository;
use super::task_repository::SeaOrmTaskRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let car = repos.cars().find_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    cars: SeaOrmCarRepository,
    rentals: SeaOrmRentalRepository,
    tasks: SeaOrmTaskRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cars: SeaOrmCarRepository::new(db.clone()),
            rentals: SeaOrmRentalRepository::new(db.clone()),
            tasks: SeaOrmTaskRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn cars(&self) -> &dyn CarRepository {
        &self.cars
    }

    fn rentals(&self) -> &dyn RentalRepository {
        &self.rentals
    }

    fn tasks(&self) -> &dyn TaskRepository {
        &self.tasks
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
