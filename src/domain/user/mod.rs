//! User aggregate
//!
//! Contains the User entity, its access-control role, and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewUser, Role, User};
pub use repository::UserRepository;
