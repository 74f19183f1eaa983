//! Domain layer: entities, admission rules and repository interfaces

pub mod car;
pub mod rental;
pub mod repositories;
pub mod task;
pub mod user;

pub use car::{Car, CarFilter, CarInput, CarRepository};
pub use rental::{ConflictPolicy, NewRental, Rental, RentalAdmission, RentalRepository, RentalWindow};
pub use repositories::{DomainResult, RepositoryProvider};
pub use task::{Task, TaskInput, TaskRepository};
pub use user::{NewUser, Role, User, UserRepository};

pub use crate::shared::DomainError;
