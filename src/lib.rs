//! # BCR API
//!
//! Car-rental REST backend: authentication, a car catalogue with rentals,
//! and task records.
//!
//! ## Architecture
//!
//! - **domain**: entities, admission rules and repository traits
//! - **application**: use-case services
//! - **infrastructure**: SeaORM persistence, in-memory storage, crypto
//! - **interfaces**: axum router, handlers and middleware
//! - **shared**: errors, pagination, time parsing, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::create_api_router;
