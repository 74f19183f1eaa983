//! Car aggregate
//!
//! Contains the Car entity, listing filter, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Car, CarFilter, CarInput};
pub use repository::CarRepository;
