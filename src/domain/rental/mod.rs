//! Rental aggregate (the `user_cars` records)
//!
//! Contains the rental record, the requested window, the conflict policy
//! used by the admission check, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{ConflictPolicy, NewRental, Rental, RentalAdmission, RentalWindow};
pub use repository::RentalRepository;
